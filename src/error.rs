//! Error types for the encoding normalizer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Anything that aborts a normalization run.
///
/// None of these are recovered from: the first error ends the run and
/// files after the failing one are left untouched.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The probe program could not be started at all.
    #[error("encoding probe `{program}` is unavailable: {source}")]
    ProbeUnavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The probe ran but reported an error for this file.
    #[error("encoding probe failed on {path} ({status}): {stderr}")]
    ProbeFailed {
        path: PathBuf,
        status: String,
        stderr: String,
    },

    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The re-encoded content could not be written back.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The announcement line could not be written to the console.
    #[error("failed to write console output: {0}")]
    Output(#[source] io::Error),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
