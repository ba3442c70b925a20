//! Domain types for tenantsync.
//!
//! Provider-facing records (`ChangeItem`, `TreeEntry`, `FileContent`) are the
//! normalized forms the engine consumes; backend adapters translate their own
//! wire shapes into these. `ConfigBundle` is the artifact handed to the
//! deployment stage and is immutable once returned.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed changeset (commit) reference in the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangesetId(pub String);

impl fmt::Display for ChangesetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ChangesetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChangesetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifies one materialization request: a provider project plus the
/// changeset to materialize at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangesetRef {
    pub project: String,
    pub changeset_id: ChangesetId,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Tenant-configuration category a relevant path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Settings,
    Rules,
    Pages,
    Guardian,
    EmailTemplates,
    Databases,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Settings => write!(f, "settings"),
            Category::Rules => write!(f, "rules"),
            Category::Pages => write!(f, "pages"),
            Category::Guardian => write!(f, "guardian"),
            Category::EmailTemplates => write!(f, "email-templates"),
            Category::Databases => write!(f, "databases"),
        }
    }
}

/// Encoding of a provider content envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    #[default]
    Utf8,
    Base64,
}

// ---------------------------------------------------------------------------
// Provider-facing records
// ---------------------------------------------------------------------------

/// One changed path reported by the provider for a changeset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeItem {
    pub path: String,
}

/// One entry of a single-level tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(default)]
    pub is_folder: bool,
    #[serde(default)]
    pub size: u64,
}

impl TreeEntry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            is_folder: false,
            size,
        }
    }

    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_folder: true,
            size: 0,
        }
    }
}

/// Raw file content as returned by a provider, before decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub content: String,
    #[serde(default)]
    pub encoding: ContentEncoding,
}

impl FileContent {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encoding: ContentEncoding::Utf8,
        }
    }

    pub fn base64(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encoding: ContentEncoding::Base64,
        }
    }
}

// ---------------------------------------------------------------------------
// Classification targets
// ---------------------------------------------------------------------------

/// Where a relevant path lands inside the bundle.
///
/// Produced by the classifier, consumed by [`ConfigBundle`]; traversal and
/// decoding never inspect the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigTarget {
    /// The tenant settings document (`tenant.json`).
    Settings,
    Rule { name: String },
    Page { name: String },
    Guardian { name: String },
    EmailTemplate { name: String },
    /// A script inside a database connection's folder.
    DatabaseScript { connection: String, script: String },
    /// The folder of a database connection; relevant on its own, meaning
    /// "this connection exists" even with zero scripts.
    DatabaseFolder { connection: String },
}

impl ConfigTarget {
    pub fn category(&self) -> Category {
        match self {
            ConfigTarget::Settings => Category::Settings,
            ConfigTarget::Rule { .. } => Category::Rules,
            ConfigTarget::Page { .. } => Category::Pages,
            ConfigTarget::Guardian { .. } => Category::Guardian,
            ConfigTarget::EmailTemplate { .. } => Category::EmailTemplates,
            ConfigTarget::DatabaseScript { .. } | ConfigTarget::DatabaseFolder { .. } => {
                Category::Databases
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigBundle
// ---------------------------------------------------------------------------

/// Decoded content of one relevant file.
///
/// Untagged: a structured document serializes as its JSON value, a script as
/// its raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigContent {
    Script(String),
    Structured(serde_json::Value),
}

/// Scripts of one database connection, keyed by script identifier.
pub type ScriptSet = BTreeMap<String, ConfigContent>;

/// Normalized tenant configuration assembled by one materialization pass.
///
/// Empty sections are skipped on serialization, so the serialized keys are
/// exactly the categories with at least one relevant file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, ConfigContent>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pages: BTreeMap<String, ConfigContent>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub guardian: BTreeMap<String, ConfigContent>,
    #[serde(
        default,
        rename = "email-templates",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub email_templates: BTreeMap<String, ConfigContent>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub databases: BTreeMap<String, ScriptSet>,
}

impl ConfigBundle {
    /// Route decoded content into its category slot.
    ///
    /// A `DatabaseFolder` target registers the connection without content;
    /// callers pass `None` for it.
    pub fn insert(&mut self, target: &ConfigTarget, content: Option<ConfigContent>) {
        match target {
            ConfigTarget::Settings => {
                if let Some(ConfigContent::Structured(value)) = content {
                    self.settings = Some(value);
                }
            }
            ConfigTarget::Rule { name } => {
                if let Some(c) = content {
                    self.rules.insert(name.clone(), c);
                }
            }
            ConfigTarget::Page { name } => {
                if let Some(c) = content {
                    self.pages.insert(name.clone(), c);
                }
            }
            ConfigTarget::Guardian { name } => {
                if let Some(c) = content {
                    self.guardian.insert(name.clone(), c);
                }
            }
            ConfigTarget::EmailTemplate { name } => {
                if let Some(c) = content {
                    self.email_templates.insert(name.clone(), c);
                }
            }
            ConfigTarget::DatabaseScript { connection, script } => {
                let scripts = self.databases.entry(connection.clone()).or_default();
                if let Some(c) = content {
                    scripts.insert(script.clone(), c);
                }
            }
            ConfigTarget::DatabaseFolder { connection } => {
                self.databases.entry(connection.clone()).or_default();
            }
        }
    }

    /// True when no category holds any entry.
    pub fn is_empty(&self) -> bool {
        self.settings.is_none()
            && self.rules.is_empty()
            && self.pages.is_empty()
            && self.guardian.is_empty()
            && self.email_templates.is_empty()
            && self.databases.is_empty()
    }

    /// Number of materialized entries across all categories. Empty database
    /// connections count as one entry each.
    pub fn len(&self) -> usize {
        usize::from(self.settings.is_some())
            + self.rules.len()
            + self.pages.len()
            + self.guardian.len()
            + self.email_templates.len()
            + self
                .databases
                .values()
                .map(|s| s.len().max(1))
                .sum::<usize>()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
