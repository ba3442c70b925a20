//! `tenantsync check` — does a changeset touch tenant configuration?

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tenantsync_core::types::ChangesetId;
use tenantsync_core::SyncConfig;
use tenantsync_engine::ChangeDetector;

use super::build_provider;

/// Arguments for `tenantsync check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Changeset (commit) reference to inspect.
    pub changeset: String,

    /// Path to the sync configuration document.
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Checkout root (filesystem provider only).
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let config = SyncConfig::load(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;
        let provider = build_provider(&config, self.root.as_deref())?;

        let changeset = ChangesetId::from(self.changeset.as_str());
        let relevant = ChangeDetector::new(&config)
            .has_changes(provider.as_ref(), &changeset)
            .with_context(|| format!("change detection failed for '{changeset}'"))?;

        if relevant {
            println!(
                "{} changeset '{changeset}' touches tenant configuration",
                "✓".green()
            );
        } else {
            println!(
                "{} changeset '{changeset}' has no relevant changes",
                "·".dimmed()
            );
        }
        Ok(())
    }
}
