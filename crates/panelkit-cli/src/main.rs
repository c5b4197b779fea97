//! panelkit CLI - panel declaration and within/between transformations.

mod cli;
mod commands;
mod load;

use clap::Parser;
use cli::{Cli, Commands};
use commands::transform::Transform;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Describe {
            file,
            panel,
            force_uniqueness_check,
            json,
        } => commands::describe::run(file, panel, force_uniqueness_check, json, cli.verbose),

        Commands::Within(args) => commands::transform::run(Transform::Within, args, cli.verbose),

        Commands::Between(args) => commands::transform::run(Transform::Between, args, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
