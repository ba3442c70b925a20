//! tenantsync — tenant configuration sync CLI.
//!
//! # Usage
//!
//! ```text
//! tenantsync check <changeset> [--config config.json] [--root <checkout>]
//! tenantsync export [<changeset>] [--config config.json] [--root <checkout>]
//!                   [--out bundle.json] [--pretty]
//! ```
//!
//! The provider backend (TFVC REST or local checkout) is selected by the
//! `TYPE` key of the configuration document.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{check::CheckArgs, export::ExportArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "tenantsync",
    version,
    about = "Detect and export tenant configuration from a version-control provider",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask whether a changeset touched tenant configuration.
    Check(CheckArgs),

    /// Materialize the tenant tree into a configuration bundle.
    Export(ExportArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check(args) => args.run(),
        Commands::Export(args) => args.run(),
    }
}
