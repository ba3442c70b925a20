//! Subcommand implementations for the `tenantsync` binary.

pub mod check;
pub mod export;

use std::path::Path;

use anyhow::{Context, Result};

use tenantsync_core::{ProviderType, SyncConfig};
use tenantsync_engine::Provider;
use tenantsync_providers::{FsProvider, TfvcProvider};

/// Build the configured provider backend.
///
/// The filesystem backend additionally needs the checkout root, which is a
/// CLI concern rather than part of the shared configuration document.
pub fn build_provider(config: &SyncConfig, root: Option<&Path>) -> Result<Box<dyn Provider>> {
    match config.provider_type {
        ProviderType::Tfvc => Ok(Box::new(TfvcProvider::new(config))),
        ProviderType::Filesystem => {
            let root = root.context("--root is required with the filesystem provider")?;
            Ok(Box::new(FsProvider::new(root)))
        }
    }
}
