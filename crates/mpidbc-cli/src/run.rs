//! Driver for the mpidbc filter pipeline.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use mpidbc_core::{scan, ScanOptions};
use mpidbc_formats::FormatterRegistry;
use tracing::info;

use crate::cli::Cli;

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute the CLI: list formats, or run the filter over stdin/stdout.
pub fn execute(cli: &Cli) -> Result<()> {
    let registry = FormatterRegistry::with_builtins()?;

    if cli.list_formats {
        let stdout = io::stdout();
        print_formats(&registry, &mut stdout.lock())?;
        return Ok(());
    }

    // Both positionals are enforced by clap when --list-formats is absent.
    let format = cli.format.as_deref().ok_or("missing format name")?;
    let file = cli.file.as_deref().ok_or("missing configuration file path")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_pipeline(
        &mut stdin.lock(),
        &mut stdout.lock(),
        &registry,
        format,
        file,
        &cli.name,
        cli.source_dir.as_deref(),
    )
}

/// Runs the full filter: scan `input` until the session completes, write
/// the configuration file, then forward the rest of `input` verbatim.
///
/// The format name is resolved before any input is read, so an unknown
/// name fails without consuming the stream. The configuration file is
/// only created once the session is complete; a stream that ends early
/// leaves no file behind.
pub fn run_pipeline<R, W>(
    input: &mut R,
    forward: &mut W,
    registry: &FormatterRegistry,
    format: &str,
    config_path: &Path,
    config_name: &str,
    source_dir: Option<&str>,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let entry = registry.resolve(format)?;

    let opts = ScanOptions {
        config_name: config_name.to_string(),
        source_dir: source_dir.map(String::from),
        construct: entry.constructor(),
    };

    let formatter = scan(input, forward, &opts)?
        .ok_or("input ended before all expected ranks were announced")?;

    info!(
        path = %config_path.display(),
        format = format,
        ranks = formatter.endpoints().len(),
        "writing debug configuration"
    );
    let mut config_file = BufWriter::new(File::create(config_path)?);
    formatter.write_config(&mut config_file)?;
    config_file.flush()?;

    // Forward whatever the session prints after the attach phase, without
    // re-parsing.
    io::copy(input, forward)?;
    forward.flush()?;

    Ok(())
}

/// Prints one `name  description` line per registered format.
fn print_formats<W: Write>(registry: &FormatterRegistry, sink: &mut W) -> io::Result<()> {
    for info in registry.list() {
        writeln!(sink, "{:<8}{}", info.name, info.description)?;
    }
    Ok(())
}
