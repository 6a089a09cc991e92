//! Per-file classification and per-run outcome types.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Human-readable description returned by an encoding probe.
///
/// Produced fresh for every file and dropped once the file is handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor(String);

impl TypeDescriptor {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.trim_end())
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Files classified during the run
    pub visited: usize,
    /// Files rewritten as UTF-8, in processing order
    pub converted: Vec<PathBuf>,
}

impl RunReport {
    /// Files that were classified but left alone.
    pub fn unchanged(&self) -> usize {
        self.visited - self.converted.len()
    }
}
