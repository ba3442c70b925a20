//! Changeset relevance detection.

use tenantsync_classifier::RelevanceRules;
use tenantsync_core::types::ChangesetId;
use tenantsync_core::SyncConfig;

use crate::error::EngineError;
use crate::provider::Provider;

/// Answers "does changeset X touch tenant configuration?".
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    rules: RelevanceRules,
}

impl ChangeDetector {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            rules: RelevanceRules::new(&config.project_path),
        }
    }

    /// True iff at least one changed path is relevant, irrespective of its
    /// position in the list. Short-circuits on the first match; an empty
    /// change list is false. Provider failures propagate unchanged.
    pub fn has_changes(
        &self,
        provider: &dyn Provider,
        changeset: &ChangesetId,
    ) -> Result<bool, EngineError> {
        let changed = provider.list_changed_paths(changeset)?;
        tracing::debug!("changeset {changeset}: {} changed paths", changed.len());
        Ok(changed
            .iter()
            .any(|item| self.rules.classify(&item.path).is_relevant()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
