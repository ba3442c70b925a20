//! Error types for tenantsync-engine.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by a provider backend.
///
/// The engine never retries; every variant propagates unchanged to the
/// caller of `has_changes` / `materialize`.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or authentication failure during a provider call.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// The provider answered with a non-success HTTP status.
    #[error("provider returned status {status} for {path}")]
    Http { status: u16, path: String },

    /// The requested path does not exist in the repository.
    #[error("path not found in repository: {path}")]
    NotFound { path: String },

    /// The provider response could not be interpreted.
    #[error("malformed provider response for {path}: {message}")]
    Malformed { path: String, message: String },

    /// Local I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`ProviderError::Io`].
pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ProviderError {
    ProviderError::Io {
        path: path.into(),
        source,
    }
}

/// All errors that can arise from change detection and materialization.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A provider failure, propagated unchanged.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A file matched as structured data failed to parse. Aborts the whole
    /// materialization call; partial bundles are never returned.
    #[error("failed to parse {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider content envelope could not be unwrapped (bad base64,
    /// non-UTF-8 payload).
    #[error("invalid content envelope at {path}: {message}")]
    Envelope { path: String, message: String },
}
