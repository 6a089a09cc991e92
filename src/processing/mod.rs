//! Processing module for encoding normalization.
//!
//! This module provides:
//! - Recursive file enumeration
//! - Encoding probes (external `file` command or in-process sniffing)
//! - Latin-1 to UTF-8 transcoding
//! - The normalizer tying them together

pub mod normalizer;
pub mod probe;
pub mod transcode;
pub mod walker;

pub use normalizer::EncodingNormalizer;
pub use probe::{probe_from_config, ContentSniffProbe, EncodingProbe, FileCommandProbe};
pub use transcode::{decode_latin1, transcode_file};
pub use walker::enumerate_files;
