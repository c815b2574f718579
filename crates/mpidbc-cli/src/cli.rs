//! Command-line interface definition using clap.

use clap::Parser;
use std::path::PathBuf;

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "0.1.0 (abc1234, 2026-08-07)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// mpidbc - Reads info written by mpidb from stdin and generates one of the
/// available debug configuration formats
#[derive(Parser, Debug)]
#[command(name = "mpidbc")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Format of the configuration file (see --list-formats)
    #[arg(required_unless_present = "list_formats")]
    pub format: Option<String>,

    /// Path of the configuration file
    #[arg(required_unless_present = "list_formats")]
    pub file: Option<PathBuf>,

    /// Name of the debug configuration
    #[arg(short, long, default_value = "debug")]
    pub name: String,

    /// Source directory appended to the debugger's search path
    #[arg(short, long)]
    pub source_dir: Option<String>,

    /// List available formats with their descriptions and exit
    #[arg(long)]
    pub list_formats: bool,

    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
