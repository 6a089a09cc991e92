//! Configuration types for a normalization run.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{NormalizeError, Result};
use crate::{DEFAULT_MARKER, DEFAULT_PROBE_COMMAND, DEFAULT_ROOT};

/// Name of the optional config file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "recoder";

/// Prefix for environment variable overrides (`RECODER_ROOT`, ...).
pub const ENV_PREFIX: &str = "RECODER";

/// Which probe classifies files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// Run an external `file`-style program.
    Command,
    /// Inspect the bytes in-process.
    Sniff,
}

impl std::str::FromStr for ProbeKind {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "command" => Ok(ProbeKind::Command),
            "sniff" => Ok(ProbeKind::Sniff),
            other => Err(NormalizeError::Config(format!(
                "unknown probe kind `{}` (expected `command` or `sniff`)",
                other
            ))),
        }
    }
}

/// Settings for one normalizer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Directory whose subtree is normalized
    pub root: PathBuf,

    /// Probe used to classify each file
    pub probe: ProbeKind,

    /// Program run by the command probe
    pub probe_command: String,

    /// Extra arguments passed before the file path
    #[serde(default, deserialize_with = "deserialize_args")]
    pub probe_args: Vec<String>,

    /// Pattern a descriptor must match for the file to be converted
    pub marker: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            probe: ProbeKind::Command,
            probe_command: DEFAULT_PROBE_COMMAND.to_string(),
            probe_args: Vec::new(),
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl NormalizerConfig {
    /// Load configuration from environment variables only.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            root: std::env::var("RECODER_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.root),
            probe: match std::env::var("RECODER_PROBE") {
                Ok(kind) => kind.parse()?,
                Err(_) => defaults.probe,
            },
            probe_command: std::env::var("RECODER_PROBE_COMMAND")
                .unwrap_or(defaults.probe_command),
            probe_args: std::env::var("RECODER_PROBE_ARGS")
                .map(|s| split_args(&s))
                .unwrap_or(defaults.probe_args),
            marker: std::env::var("RECODER_MARKER").unwrap_or(defaults.marker),
        })
    }

    /// Load configuration from defaults, then `recoder.toml` if present,
    /// then `RECODER_*` environment variables.
    ///
    /// Environment values are kept as strings, so `RECODER_ROOT=0755` stays
    /// `0755`.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("root", defaults.root.to_string_lossy().into_owned())
            .and_then(|b| b.set_default("probe", "command"))
            .and_then(|b| b.set_default("probe_command", defaults.probe_command))
            .and_then(|b| b.set_default("probe_args", Vec::<String>::new()))
            .and_then(|b| b.set_default("marker", defaults.marker))
            .map_err(config_error)?
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(config_error)?;

        settings.try_deserialize().map_err(config_error)
    }

    /// Create a config for the given root with all other values defaulted.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Set the probe kind.
    pub fn with_probe(mut self, probe: ProbeKind) -> Self {
        self.probe = probe;
        self
    }

    /// Set the marker pattern.
    pub fn with_marker(mut self, marker: &str) -> Self {
        self.marker = marker.to_string();
        self
    }
}

fn split_args(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Accept probe arguments as a TOML array or a whitespace-separated string.
fn deserialize_args<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Args {
        Line(String),
        List(Vec<String>),
    }

    Ok(match Args::deserialize(deserializer)? {
        Args::Line(line) => split_args(&line),
        Args::List(list) => list,
    })
}

fn config_error(e: config::ConfigError) -> NormalizeError {
    NormalizeError::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_historical_layout() {
        let config = NormalizerConfig::default();

        assert_eq!(config.root, PathBuf::from("src/main/java"));
        assert_eq!(config.probe, ProbeKind::Command);
        assert_eq!(config.probe_command, "file");
        assert!(config.probe_args.is_empty());
        assert_eq!(config.marker, "8859");
    }

    #[test]
    fn test_probe_kind_parsing() {
        assert_eq!("command".parse::<ProbeKind>().unwrap(), ProbeKind::Command);
        assert_eq!(" Sniff ".parse::<ProbeKind>().unwrap(), ProbeKind::Sniff);
        assert!("magic".parse::<ProbeKind>().is_err());
    }

    #[test]
    fn test_args_from_string_or_list() {
        let from_line: NormalizerConfig = serde_json::from_value(serde_json::json!({
            "root": "0755",
            "probe": "command",
            "probe_command": "file",
            "probe_args": "  --brief   --mime-encoding ",
            "marker": "08859",
        }))
        .unwrap();
        assert_eq!(from_line.probe_args, vec!["--brief", "--mime-encoding"]);
        assert_eq!(from_line.root, PathBuf::from("0755"));
        assert_eq!(from_line.marker, "08859");

        let from_list: NormalizerConfig = serde_json::from_value(serde_json::json!({
            "root": "src",
            "probe": "sniff",
            "probe_command": "file",
            "probe_args": ["-b"],
            "marker": "8859",
        }))
        .unwrap();
        assert_eq!(from_list.probe_args, vec!["-b"]);
    }

    #[test]
    fn test_builders() {
        let config = NormalizerConfig::with_root("/tmp/tree")
            .with_probe(ProbeKind::Sniff)
            .with_marker("ISO-8859-1");

        assert_eq!(config.root, PathBuf::from("/tmp/tree"));
        assert_eq!(config.probe, ProbeKind::Sniff);
        assert_eq!(config.marker, "ISO-8859-1");
        assert_eq!(config.probe_command, "file");
    }
}
