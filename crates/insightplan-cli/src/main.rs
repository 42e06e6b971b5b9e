//! InsightPlan CLI - smart performance tracker for student marks.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            file,
            llm,
            model,
            naive,
            delimiter,
            degenerate,
            keywords,
            json,
        } => commands::analyze::run(commands::analyze::AnalyzeArgs {
            file,
            llm,
            model,
            naive,
            delimiter,
            degenerate,
            keywords,
            json,
        }),

        Commands::Format {
            file,
            keywords,
            json,
        } => commands::format::run(file, keywords, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
