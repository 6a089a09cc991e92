//! Encoding probes.
//!
//! A probe answers one question for the normalizer: "what does this file
//! look like?". The answer is a free-form [`TypeDescriptor`]; the only part
//! the normalizer relies on is whether it carries an ISO-8859 hint.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::str;

use tracing::debug;

use crate::error::{NormalizeError, Result};
use crate::types::{NormalizerConfig, ProbeKind, TypeDescriptor};

/// Number of leading bytes inspected for binary content.
const BINARY_SAMPLE_SIZE: usize = 8192;

/// Capability to classify a file's encoding.
pub trait EncodingProbe {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Describe the file at `path`.
    fn describe(&self, path: &Path) -> Result<TypeDescriptor>;
}

impl<P: EncodingProbe + ?Sized> EncodingProbe for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn describe(&self, path: &Path) -> Result<TypeDescriptor> {
        (**self).describe(path)
    }
}

/// Build the probe selected by the configuration.
pub fn probe_from_config(config: &NormalizerConfig) -> Box<dyn EncodingProbe> {
    match config.probe {
        ProbeKind::Command => Box::new(
            FileCommandProbe::new(&config.probe_command).with_args(config.probe_args.clone()),
        ),
        ProbeKind::Sniff => Box::new(ContentSniffProbe::new()),
    }
}

/// Probe that shells out to a `file(1)`-compatible program.
///
/// The program is run directly (no shell) with the configured arguments
/// followed by the path, and its stdout is the descriptor.
#[derive(Debug, Clone)]
pub struct FileCommandProbe {
    program: String,
    args: Vec<String>,
}

impl FileCommandProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl EncodingProbe for FileCommandProbe {
    fn name(&self) -> &'static str {
        "command"
    }

    fn describe(&self, path: &Path) -> Result<TypeDescriptor> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|source| NormalizeError::ProbeUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(NormalizeError::ProbeFailed {
                path: path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(TypeDescriptor::new(String::from_utf8_lossy(&output.stdout)))
    }
}

/// In-process probe that labels files the way `file(1)` does for text.
///
/// Labels: `empty`, `ASCII text`, `UTF-8 Unicode text`, `ISO-8859 text`,
/// `data`. Binary-looking content is `data` and never carries the 8859
/// hint, so images and class files are never rewritten.
#[derive(Debug, Clone, Default)]
pub struct ContentSniffProbe;

impl ContentSniffProbe {
    pub fn new() -> Self {
        Self
    }

    /// Label raw content.
    pub fn label(&self, content: &[u8]) -> &'static str {
        if content.is_empty() {
            return "empty";
        }

        if looks_binary(&content[..content.len().min(BINARY_SAMPLE_SIZE)]) {
            return "data";
        }

        if content.is_ascii() {
            return "ASCII text";
        }

        if str::from_utf8(content).is_ok() {
            return "UTF-8 Unicode text";
        }

        // Every byte sequence is valid Latin-1
        "ISO-8859 text"
    }
}

impl EncodingProbe for ContentSniffProbe {
    fn name(&self) -> &'static str {
        "sniff"
    }

    fn describe(&self, path: &Path) -> Result<TypeDescriptor> {
        let content = fs::read(path).map_err(|source| NormalizeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let label = self.label(&content);
        debug!(path = %path.display(), label, "Sniffed content");

        Ok(TypeDescriptor::new(format!("{}: {}", path.display(), label)))
    }
}

/// A NUL byte, or control bytes making up more than a tenth of the sample.
fn looks_binary(sample: &[u8]) -> bool {
    if sample.contains(&0) {
        return true;
    }

    // Tab, newline, form feed and carriage return are ordinary in source text
    let controls = sample
        .iter()
        .filter(|&&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | 0x0c | b'\r'))
        .count();

    controls * 10 > sample.len()
}
