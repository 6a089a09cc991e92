//! Recoder Library
//!
//! Walks a source tree, finds files encoded as ISO-8859-1 (Latin-1) and
//! rewrites them in place as UTF-8.

pub mod error;
pub mod processing;
pub mod types;

pub use error::NormalizeError;
pub use processing::{ContentSniffProbe, EncodingNormalizer, EncodingProbe, FileCommandProbe};
pub use types::{NormalizerConfig, ProbeKind, RunReport, TypeDescriptor};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{NormalizeError, Result};
    pub use crate::processing::*;
    pub use crate::types::*;
}

/// Default root directory, relative to the working directory
pub const DEFAULT_ROOT: &str = "src/main/java";

/// Default program used to classify files
pub const DEFAULT_PROBE_COMMAND: &str = "file";

/// Default pattern identifying ISO-8859 descriptors
pub const DEFAULT_MARKER: &str = "8859";
