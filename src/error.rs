use std::path::PathBuf;

use thiserror::Error;

/// Rejections raised by the request gate before the analysis runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid JSON payload")]
    InvalidJson,

    #[error("Request body must be a JSON object.")]
    NotAnObject,

    #[error("Select at least one platform.")]
    MissingPlatforms,

    #[error("postingDaysPerWeek must be a positive number.")]
    InvalidPostingDays,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Unable to analyze request: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
