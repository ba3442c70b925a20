//! Sync configuration.
//!
//! # Document layout
//!
//! ```json
//! {
//!   "TYPE": "tfvc",
//!   "INSTANCE": "test-instance",
//!   "COLLECTION": "defaultCollection",
//!   "REPOSITORY": "test/auth0",
//!   "BRANCH": "master",
//!   "TOKEN": "secret_token",
//!   "PROJECT_PATH": "$/TFVC-test/tenant"
//! }
//! ```
//!
//! # API pattern
//!
//! The configuration is loaded once and passed by value into each component
//! at construction. Nothing reads ambient global state; tests build a
//! [`SyncConfig`] literal or point [`SyncConfig::load`] at a temp file.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which provider backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Tfvc,
    Filesystem,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::Tfvc => write!(f, "tfvc"),
            ProviderType::Filesystem => write!(f, "filesystem"),
        }
    }
}

/// Immutable sync configuration shared by every component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SyncConfig {
    #[serde(rename = "TYPE", default)]
    pub provider_type: ProviderType,
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub token: Option<String>,
    pub project_path: String,
}

impl SyncConfig {
    /// Load the configuration from a JSON document at `path`.
    ///
    /// Returns `ConfigError::NotFound` if absent, `ConfigError::Parse`
    /// (with path context) if malformed.
    pub fn load(path: &Path) -> Result<SyncConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let config: SyncConfig = serde_json::from_str(&contents).map_err(|e| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Provider path of the tenant settings document, fully known from
    /// configuration alone.
    pub fn settings_path(&self) -> String {
        format!("{}/tenant.json", self.project_path.trim_end_matches('/'))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.project_path.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                key: "PROJECT_PATH",
            });
        }
        if self.provider_type == ProviderType::Tfvc {
            if self.instance.is_empty() {
                return Err(ConfigError::MissingValue { key: "INSTANCE" });
            }
            if self.collection.is_empty() {
                return Err(ConfigError::MissingValue { key: "COLLECTION" });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
