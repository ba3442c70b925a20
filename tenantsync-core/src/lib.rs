//! tenantsync core library — domain types, sync configuration, errors.
//!
//! Public API surface:
//! - [`types`] — provider records, classification targets, [`ConfigBundle`]
//! - [`config`] — immutable [`SyncConfig`] loaded once at startup
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{ProviderType, SyncConfig};
pub use error::ConfigError;
pub use types::{
    Category, ChangeItem, ChangesetId, ChangesetRef, ConfigBundle, ConfigContent, ConfigTarget,
    ContentEncoding, FileContent, ScriptSet, TreeEntry,
};
