//! Arbitrate CLI - reconcile double-coded case data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let inputs = &cli.inputs;
    let result = match cli.command {
        Commands::Status { json, all } => commands::status::run(inputs, json, all),

        Commands::Resolve { output } => commands::resolve::run(inputs, output),

        Commands::Export {
            only_fully_arbitrated,
            output,
        } => commands::export::run(inputs, only_fully_arbitrated, output),

        Commands::Reliability { output, print } => {
            commands::reliability::run(inputs, output, print)
        }

        Commands::Map { old, new, output } => commands::map::run_map(inputs, &old, &new, output),

        Commands::Unmap { old, output } => commands::map::run_unmap(inputs, &old, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
