//! The provider capability interface.
//!
//! A provider is the version-control backend (TFVC-style centralized, git
//! style distributed, a plain checkout on disk) that supplies changed-path
//! listings, single-level tree listings, and file content. The engine
//! depends only on this trait; backends are substituted without touching
//! [`crate::ChangeDetector`] or [`crate::TreeMaterializer`].
//!
//! Authentication is the adapter's concern: a constructed provider value is
//! already an authenticated handle. Timeouts and retry policy likewise live
//! in the adapter, never here.

use tenantsync_core::types::{ChangeItem, ChangesetId, FileContent, TreeEntry};

use crate::error::ProviderError;

pub trait Provider {
    /// All paths touched by the given changeset.
    fn list_changed_paths(&self, changeset: &ChangesetId) -> Result<Vec<ChangeItem>, ProviderError>;

    /// One level of children under `dir`.
    fn list_tree(&self, dir: &str) -> Result<Vec<TreeEntry>, ProviderError>;

    /// Raw content of the file at `path`, still wrapped in the provider's
    /// content envelope.
    fn fetch_content(&self, path: &str) -> Result<FileContent, ProviderError>;
}
