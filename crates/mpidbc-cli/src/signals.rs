//! Maps interrupt signals to prompt process exit.

use std::io;
use std::thread;

use signal_hook::consts::{SIGABRT, SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

/// Names a signal for the exit diagnostic.
fn signal_name(signal: i32) -> &'static str {
    match signal {
        SIGINT => "SIGINT",
        SIGABRT => "SIGABRT",
        SIGTERM => "SIGTERM",
        _ => "UNKNOWN",
    }
}

/// Registers handlers for SIGINT, SIGABRT and SIGTERM.
///
/// The watcher thread exits the whole process with a diagnostic naming
/// the signal, so a scan blocked on stdin terminates promptly. No attempt
/// is made to finish or clean up a partially written configuration file.
pub fn install() -> io::Result<()> {
    let mut signals = Signals::new([SIGINT, SIGABRT, SIGTERM])?;
    thread::spawn(move || {
        if let Some(signal) = signals.forever().next() {
            eprintln!("Caught signal {}", signal_name(signal));
            std::process::exit(1);
        }
    });
    Ok(())
}
