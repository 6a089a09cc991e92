//! Core types for the encoding normalizer.

mod config;
mod report;

pub use config::{NormalizerConfig, ProbeKind, CONFIG_FILE_NAME, ENV_PREFIX};
pub use report::{RunReport, TypeDescriptor};
