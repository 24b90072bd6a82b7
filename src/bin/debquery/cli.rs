//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Debquery - query the dpkg status database
#[derive(Parser)]
#[command(name = "debquery")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the configuration file
    #[arg(long, global = true, env = "DEBQUERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the dpkg status file (overrides the configured path)
    #[arg(short = 'f', long, global = true, env = "DEBQUERY_STATUS_FILE")]
    pub status_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command, resolved once in main.
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub status_file: Option<PathBuf>,
    pub color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List installed packages with their description summaries
    List(ListArgs),

    /// Show one package's details
    Show(ShowArgs),

    /// Show the packages that depend on a package
    Dependents(DependentsArgs),

    /// Show the virtual-package provides map
    Provides(ProvidesArgs),

    /// Validate that the status file parses
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Emit the index as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Package name (virtual names resolve through the provides map)
    pub name: String,

    /// Field to include in the output (repeatable; defaults to the
    /// configured return_fields)
    #[arg(long = "field")]
    pub fields: Vec<String>,
}

#[derive(Args)]
pub struct DependentsArgs {
    /// Package name
    pub name: String,

    /// Emit the dependents as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ProvidesArgs {
    /// Emit the provides map as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
