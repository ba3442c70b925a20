//! Error types for tenantsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading the sync configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file did not exist at the expected path.
    #[error("configuration not found at {path}")]
    NotFound { path: PathBuf },

    /// JSON parse error on load, with file path context.
    #[error("failed to parse configuration at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required configuration key is missing or empty for the selected
    /// provider type.
    #[error("missing configuration value: {key}")]
    MissingValue { key: &'static str },
}
