//! CLI type definitions.

use clap::{Parser, Subcommand};

use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::dump::DumpArgs;
use crate::cli::commands::migrate::MigrateArgs;

#[derive(Parser)]
#[command(name = "tessera-config")]
#[command(about = "Tessera Workbench cluster configuration tools", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the merged configuration
    Dump(DumpArgs),

    /// Express legacy application.yml keys in cluster config format
    Migrate(MigrateArgs),

    /// Validate the final merged configuration
    Check(CheckArgs),
}
