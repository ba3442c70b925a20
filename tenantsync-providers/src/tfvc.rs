//! TFVC (centralized VCS) REST provider.
//!
//! Thin blocking client over
//! `https://<instance>.visualstudio.com/<collection>/_apis/tfvc`. Three
//! endpoints back the three provider operations:
//!
//! - `changesets/<id>/changes` — changed paths for one changeset
//! - `items?scopePath=<dir>&recursionLevel=OneLevel` — one tree level
//! - `items?path=<path>&includeContent=true` — file content
//!
//! No retry and no backoff here; a failed call surfaces as
//! [`ProviderError`] and the engine aborts.

use serde::Deserialize;

use tenantsync_core::types::{ChangeItem, ChangesetId, FileContent, TreeEntry};
use tenantsync_core::SyncConfig;
use tenantsync_engine::error::ProviderError;
use tenantsync_engine::Provider;

const API_VERSION: &str = "5.0";

pub struct TfvcProvider {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

impl TfvcProvider {
    pub fn new(config: &SyncConfig) -> Self {
        let base_url = format!(
            "https://{}.visualstudio.com/{}",
            config.instance, config.collection
        );
        Self::with_base_url(base_url, config.token.clone())
    }

    /// Point the client at an explicit base URL (test servers, on-prem
    /// collection URLs).
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token,
        }
    }

    fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        context_path: &str,
    ) -> Result<T, ProviderError> {
        let url = format!("{}/_apis/tfvc/{endpoint}", self.base_url);
        let mut request = self.agent.get(&url).query("api-version", API_VERSION);
        for (key, value) in query {
            request = request.query(key, value);
        }
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        tracing::debug!("GET {url} ({context_path})");
        let response = request.call().map_err(|e| map_http(context_path, e))?;
        response
            .into_json::<T>()
            .map_err(|e| ProviderError::Malformed {
                path: context_path.to_owned(),
                message: e.to_string(),
            })
    }
}

fn map_http(path: &str, err: ureq::Error) -> ProviderError {
    match err {
        ureq::Error::Status(404, _) => ProviderError::NotFound {
            path: path.to_owned(),
        },
        ureq::Error::Status(status, _) => ProviderError::Http {
            status,
            path: path.to_owned(),
        },
        ureq::Error::Transport(transport) => ProviderError::Unavailable {
            message: transport.to_string(),
        },
    }
}

impl Provider for TfvcProvider {
    fn list_changed_paths(
        &self,
        changeset: &ChangesetId,
    ) -> Result<Vec<ChangeItem>, ProviderError> {
        let list: ValueList<ChangeRecord> = self.get(
            &format!("changesets/{changeset}/changes"),
            &[],
            &changeset.0,
        )?;
        Ok(list
            .value
            .into_iter()
            .map(|record| ChangeItem {
                path: record.item.path,
            })
            .collect())
    }

    fn list_tree(&self, dir: &str) -> Result<Vec<TreeEntry>, ProviderError> {
        let list: ValueList<ItemRecord> = self.get(
            "items",
            &[("scopePath", dir), ("recursionLevel", "OneLevel")],
            dir,
        )?;
        Ok(list
            .value
            .into_iter()
            // OneLevel includes the scoped folder itself.
            .filter(|item| item.path != dir)
            .map(TreeEntry::from)
            .collect())
    }

    fn fetch_content(&self, path: &str) -> Result<FileContent, ProviderError> {
        let item: ItemContent =
            self.get("items", &[("path", path), ("includeContent", "true")], path)?;
        Ok(FileContent::plain(item.content))
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ValueList<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ChangeRecord {
    item: ChangedItem,
}

#[derive(Debug, Deserialize)]
struct ChangedItem {
    path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord {
    path: String,
    #[serde(default)]
    is_folder: bool,
    #[serde(default)]
    size: u64,
}

impl From<ItemRecord> for TreeEntry {
    fn from(item: ItemRecord) -> Self {
        Self {
            path: item.path,
            is_folder: item.is_folder,
            size: item.size,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ItemContent {
    content: String,
}

// ---------------------------------------------------------------------------
// Tests — wire-shape deserialization only, no live HTTP
// ---------------------------------------------------------------------------
