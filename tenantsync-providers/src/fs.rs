//! Local-checkout provider.
//!
//! Serves a working copy on disk through the [`Provider`] trait, for tests
//! and offline export. Provider paths use `/` separators relative to the
//! checkout root (e.g. `tenant/rules/rule1.js`); listings are sorted for
//! deterministic traversal.

use std::path::{Path, PathBuf};

use tenantsync_core::types::{ChangeItem, ChangesetId, FileContent, TreeEntry};
use tenantsync_engine::error::{io_err, ProviderError};
use tenantsync_engine::Provider;

pub struct FsProvider {
    root: PathBuf,
}

impl FsProvider {
    /// `root` is the checkout directory the configured project path lives
    /// under.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn on_disk(&self, path: &str) -> PathBuf {
        let mut disk = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            disk.push(segment);
        }
        disk
    }
}

impl Provider for FsProvider {
    /// A checkout has no changesets; the snapshot itself is the change
    /// list: every file currently present is reported as changed.
    fn list_changed_paths(
        &self,
        changeset: &ChangesetId,
    ) -> Result<Vec<ChangeItem>, ProviderError> {
        tracing::debug!("snapshotting {} as changeset {changeset}", self.root.display());
        let mut files = Vec::new();
        walk_files(&self.root, String::new(), &mut files)?;
        files.sort();
        Ok(files.into_iter().map(|path| ChangeItem { path }).collect())
    }

    fn list_tree(&self, dir: &str) -> Result<Vec<TreeEntry>, ProviderError> {
        let disk = self.on_disk(dir);
        let mut entries: Vec<_> = std::fs::read_dir(&disk)
            .map_err(|e| map_io(&disk, dir, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| io_err(&disk, e))?;
        entries.sort_by_key(|e| e.file_name());

        let mut listing = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = format!("{dir}/{name}");
            let meta = entry.metadata().map_err(|e| io_err(entry.path(), e))?;
            listing.push(if meta.is_dir() {
                TreeEntry::folder(path)
            } else {
                TreeEntry::file(path, meta.len())
            });
        }
        Ok(listing)
    }

    fn fetch_content(&self, path: &str) -> Result<FileContent, ProviderError> {
        let disk = self.on_disk(path);
        let content = std::fs::read_to_string(&disk).map_err(|e| map_io(&disk, path, e))?;
        Ok(FileContent::plain(content))
    }
}

fn map_io(disk: &Path, provider_path: &str, source: std::io::Error) -> ProviderError {
    if source.kind() == std::io::ErrorKind::NotFound {
        ProviderError::NotFound {
            path: provider_path.to_owned(),
        }
    } else {
        io_err(disk, source)
    }
}

fn walk_files(dir: &Path, prefix: String, out: &mut Vec<String>) -> Result<(), ProviderError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| io_err(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let rel = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        let file_type = entry.file_type().map_err(|e| io_err(entry.path(), e))?;
        if file_type.is_dir() {
            walk_files(&entry.path(), rel, out)?;
        } else {
            out.push(rel);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn checkout() -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        let tenant = dir.path().join("tenant");
        std::fs::create_dir_all(tenant.join("rules")).unwrap();
        std::fs::write(tenant.join("tenant.json"), r#"{ "friendly_name": "t" }"#).unwrap();
        std::fs::write(tenant.join("rules").join("rule1.js"), "function rule1() {}").unwrap();
        dir
    }

    #[test]
    fn list_tree_is_sorted_and_typed() {
        let dir = checkout();
        let provider = FsProvider::new(dir.path());
        let listing = provider.list_tree("tenant").expect("list");
        assert_eq!(
            listing,
            vec![
                TreeEntry::folder("tenant/rules"),
                TreeEntry::file("tenant/tenant.json", 24),
            ]
        );
    }

    #[test]
    fn fetch_content_reads_verbatim() {
        let dir = checkout();
        let provider = FsProvider::new(dir.path());
        let content = provider.fetch_content("tenant/rules/rule1.js").expect("fetch");
        assert_eq!(content, FileContent::plain("function rule1() {}"));
    }

    #[test]
    fn missing_path_maps_to_not_found() {
        let dir = checkout();
        let provider = FsProvider::new(dir.path());
        let err = provider.fetch_content("tenant/rules/missing.js").unwrap_err();
        assert!(matches!(err, ProviderError::NotFound { .. }));
        let err = provider.list_tree("tenant/nope").unwrap_err();
        assert!(matches!(err, ProviderError::NotFound { .. }));
    }

    #[test]
    fn snapshot_lists_every_file_recursively() {
        let dir = checkout();
        let provider = FsProvider::new(dir.path());
        let changed = provider
            .list_changed_paths(&ChangesetId::from("snapshot"))
            .expect("snapshot");
        let paths: Vec<_> = changed.into_iter().map(|c| c.path).collect();
        assert_eq!(paths, vec!["tenant/rules/rule1.js", "tenant/tenant.json"]);
    }
}
