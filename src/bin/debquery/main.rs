//! Debquery CLI - query the dpkg status database

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands, GlobalArgs};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debquery=debug")
    } else {
        EnvFilter::new("debquery=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let globals = GlobalArgs {
        config: cli.config,
        status_file: cli.status_file,
        color: !cli.no_color,
    };

    // Execute command
    match cli.command {
        Commands::List(args) => commands::list::execute(args, &globals),
        Commands::Show(args) => commands::show::execute(args, &globals),
        Commands::Dependents(args) => commands::dependents::execute(args, &globals),
        Commands::Provides(args) => commands::provides::execute(args, &globals),
        Commands::Check(args) => commands::check::execute(args, &globals),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
