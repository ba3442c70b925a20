//! `tenantsync export` — materialize the tenant tree into a bundle file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tenantsync_core::types::{ChangesetId, ChangesetRef, ConfigBundle};
use tenantsync_core::SyncConfig;
use tenantsync_engine::TreeMaterializer;

use super::build_provider;

/// Arguments for `tenantsync export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Changeset (commit) reference to materialize at.
    #[arg(default_value = "snapshot")]
    pub changeset: String,

    /// Path to the sync configuration document.
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Checkout root (filesystem provider only).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Write the bundle here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Pretty-print the bundle JSON.
    #[arg(long)]
    pub pretty: bool,
}

impl ExportArgs {
    pub fn run(self) -> Result<()> {
        let config = SyncConfig::load(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;
        let provider = build_provider(&config, self.root.as_deref())?;

        let changeset = ChangesetRef {
            project: config.repository.clone(),
            changeset_id: ChangesetId::from(self.changeset.as_str()),
        };
        let bundle = TreeMaterializer::new(config)
            .materialize(provider.as_ref(), &changeset)
            .with_context(|| {
                format!("materialization failed at '{}'", changeset.changeset_id)
            })?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&bundle)?
        } else {
            serde_json::to_string(&bundle)?
        };

        match &self.out {
            Some(path) => {
                std::fs::write(path, &json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                print_summary(&bundle);
                println!("  → {}", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}

fn print_summary(bundle: &ConfigBundle) {
    if bundle.is_empty() {
        println!("{} exported an empty bundle", "·".dimmed());
        return;
    }
    let mut parts = Vec::new();
    if bundle.settings.is_some() {
        parts.push("settings".to_string());
    }
    for (name, count) in [
        ("rules", bundle.rules.len()),
        ("pages", bundle.pages.len()),
        ("guardian", bundle.guardian.len()),
        ("email-templates", bundle.email_templates.len()),
        ("databases", bundle.databases.len()),
    ] {
        if count > 0 {
            parts.push(format!("{count} {name}"));
        }
    }
    println!(
        "{} exported {} entries ({})",
        "✓".green(),
        bundle.len(),
        parts.join(", ")
    );
}
