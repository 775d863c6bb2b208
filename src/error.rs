use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Misconfiguration rejected when a ring or domain is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("ring capacity must be at least 2, got {0}")]
    CapacityTooSmall(usize),
    #[error("range low {low} exceeds high {high}")]
    InvertedRange { low: f32, high: f32 },
    #[error("range bounds must be finite, got [{low}, {high}]")]
    NonFiniteRange { low: f32, high: f32 },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("missing key '{0}'")]
    MissingKey(String),
    #[error("value for '{key}' is malformed: {raw:?}")]
    Malformed { key: String, raw: String },
    #[error("sample count mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Chart(#[from] ChartError),
}
