//! Tree materialization.
//!
//! Walks the configured project tree breadth-first over the provider's
//! single-level listings and assembles every relevant file into a
//! [`ConfigBundle`]. An explicit work queue (not call recursion) bounds
//! memory and keeps the walk resumable if it ever grows cancellation.

use std::collections::{HashSet, VecDeque};

use tenantsync_classifier::{Classification, FolderVerdict, RelevanceRules};
use tenantsync_core::types::{ChangesetRef, ConfigBundle, ConfigTarget};
use tenantsync_core::SyncConfig;

use crate::decoder;
use crate::error::{EngineError, ProviderError};
use crate::provider::Provider;

/// Fetches and normalizes the full tenant configuration tree.
#[derive(Debug, Clone)]
pub struct TreeMaterializer {
    config: SyncConfig,
    rules: RelevanceRules,
}

impl TreeMaterializer {
    pub fn new(config: SyncConfig) -> Self {
        let rules = RelevanceRules::new(&config.project_path);
        Self { config, rules }
    }

    /// Materialize the tree at `changeset` into a bundle.
    ///
    /// Fail-fast: the first provider or decode failure aborts the call and
    /// no partial bundle is returned. Irrelevant entries are dropped
    /// silently, and no path is fetched twice even if the provider reports
    /// duplicates.
    pub fn materialize(
        &self,
        provider: &dyn Provider,
        changeset: &ChangesetRef,
    ) -> Result<ConfigBundle, EngineError> {
        let mut bundle = ConfigBundle::default();
        let mut visited: HashSet<String> = HashSet::new();

        self.fetch_settings(provider, &mut bundle, &mut visited)?;

        let root = self.config.project_path.trim_end_matches('/').to_owned();
        let mut queue: VecDeque<String> = VecDeque::from([root]);

        while let Some(dir) = queue.pop_front() {
            if !visited.insert(dir.clone()) {
                continue;
            }
            for entry in provider.list_tree(&dir)? {
                if entry.is_folder {
                    match self.rules.classify_folder(&entry.path) {
                        FolderVerdict::Descend => queue.push_back(entry.path),
                        FolderVerdict::DatabaseRoot { connection } => {
                            // The folder alone registers the connection,
                            // scripts or not.
                            bundle.insert(&ConfigTarget::DatabaseFolder { connection }, None);
                            queue.push_back(entry.path);
                        }
                        FolderVerdict::Skip => {
                            tracing::debug!("skipping folder: {}", entry.path);
                        }
                    }
                    continue;
                }

                if visited.contains(entry.path.as_str()) {
                    continue;
                }
                match self.rules.classify(&entry.path) {
                    // A connection registers from its folder listing only;
                    // an extension-less FILE at that depth is a stray.
                    Classification::Relevant(ConfigTarget::DatabaseFolder { .. }) => {
                        tracing::debug!("skipping stray file: {}", entry.path);
                    }
                    Classification::Relevant(target) => {
                        visited.insert(entry.path.clone());
                        let raw = provider.fetch_content(&entry.path)?;
                        let content = decoder::decode(&entry.path, &raw)?;
                        bundle.insert(&target, Some(content));
                    }
                    Classification::Irrelevant => {
                        tracing::debug!("skipping: {}", entry.path);
                    }
                }
            }
        }

        tracing::info!(
            "materialized {} entries at changeset {}",
            bundle.len(),
            changeset.changeset_id
        );
        Ok(bundle)
    }

    /// The settings document's path is fully known from configuration, so it
    /// is fetched directly without a tree listing. A tenant that never
    /// checked in `tenant.json` is not an error.
    fn fetch_settings(
        &self,
        provider: &dyn Provider,
        bundle: &mut ConfigBundle,
        visited: &mut HashSet<String>,
    ) -> Result<(), EngineError> {
        let path = self.config.settings_path();
        match provider.fetch_content(&path) {
            Ok(raw) => {
                let content = decoder::decode(&path, &raw)?;
                bundle.insert(&ConfigTarget::Settings, Some(content));
            }
            Err(ProviderError::NotFound { .. }) => {
                tracing::debug!("no settings document at {path}");
            }
            Err(e) => return Err(e.into()),
        }
        visited.insert(path);
        Ok(())
    }
}
