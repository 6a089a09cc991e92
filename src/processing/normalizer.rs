//! The encoding normalizer.
//!
//! Enumerates the files under a root, classifies each one with an
//! [`EncodingProbe`], and rewrites the ones carrying the ISO-8859 marker as
//! UTF-8. Processing is strictly sequential and the first error aborts the
//! run, leaving every later file untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info};

use crate::error::{NormalizeError, Result};
use crate::processing::probe::{probe_from_config, EncodingProbe};
use crate::processing::transcode::transcode_file;
use crate::processing::walker::enumerate_files;
use crate::types::{NormalizerConfig, RunReport, TypeDescriptor};

/// Rewrites ISO-8859-1 files under a root directory as UTF-8.
pub struct EncodingNormalizer<P> {
    root: PathBuf,
    probe: P,
    marker: Regex,
}

impl EncodingNormalizer<Box<dyn EncodingProbe>> {
    /// Create a normalizer using the probe selected by `config`.
    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        Self::new(config, probe_from_config(config))
    }
}

impl<P: EncodingProbe> EncodingNormalizer<P> {
    /// Create a normalizer with an explicit probe.
    pub fn new(config: &NormalizerConfig, probe: P) -> Result<Self> {
        // The marker is an unanchored search, so the default `8859` is a
        // plain substring test and can match unrelated text in a descriptor.
        let marker = Regex::new(&config.marker).map_err(|e| {
            NormalizeError::Config(format!("invalid marker `{}`: {}", config.marker, e))
        })?;

        Ok(Self {
            root: config.root.clone(),
            probe,
            marker,
        })
    }

    pub fn into_probe(self) -> P {
        self.probe
    }

    /// List every regular file under the root, skipping unreadable directories.
    pub fn enumerate_files(&self) -> Vec<PathBuf> {
        enumerate_files(&self.root)
    }

    /// Classify one file with the probe.
    pub fn classify(&self, path: &Path) -> Result<TypeDescriptor> {
        let descriptor = self.probe.describe(path)?;
        debug!(
            path = %path.display(),
            probe = self.probe.name(),
            descriptor = %descriptor,
            "Classified file"
        );
        Ok(descriptor)
    }

    /// Whether a descriptor marks its file as ISO-8859.
    pub fn is_iso_8859(&self, descriptor: &TypeDescriptor) -> bool {
        self.marker.is_match(descriptor.as_str())
    }

    /// Convert `path` if the probe reports it as ISO-8859.
    ///
    /// Returns `true` if the file was rewritten. The announcement line is
    /// written to `out` before the file is touched.
    pub fn normalize<W: Write>(&self, path: &Path, out: &mut W) -> Result<bool> {
        let descriptor = self.classify(path)?;
        if !self.is_iso_8859(&descriptor) {
            return Ok(false);
        }

        writeln!(out, "Converting {} to UTF-8...", path.display())
            .map_err(NormalizeError::Output)?;

        let bytes = transcode_file(path)?;
        info!(path = %path.display(), bytes, "Converted file to UTF-8");

        Ok(true)
    }

    /// Normalize every file under the root, in enumeration order.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunReport> {
        let files = self.enumerate_files();
        info!(
            root = %self.root.display(),
            files = files.len(),
            probe = self.probe.name(),
            "Starting normalization"
        );

        let mut report = RunReport::default();

        for path in files {
            let converted = self.normalize(&path, out)?;
            report.visited += 1;
            if converted {
                report.converted.push(path);
            }
        }

        info!(
            visited = report.visited,
            converted = report.converted.len(),
            unchanged = report.unchanged(),
            "Normalization complete"
        );

        Ok(report)
    }
}
