//! mpidbc CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use mpidbc_cli::cli::Cli;
use mpidbc_cli::{run, signals};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing. stdout carries the forwarded stream, so all
    // diagnostics go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = signals::install() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run::execute(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
