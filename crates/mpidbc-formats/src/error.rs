//! Error types for formatter configuration.

use thiserror::Error;

/// Errors that can occur while configuring formatters.
///
/// Both variants are configuration-time errors surfaced before any input
/// is read; rendering itself reports plain `std::io::Error`.
#[derive(Error, Debug)]
pub enum FormatError {
    /// A formatter was registered under an already-taken name.
    #[error("duplicate format name: {0}")]
    DuplicateFormat(String),

    /// The requested format is not in the registry.
    #[error("unknown format '{name}' (available: {available})")]
    UnknownFormat {
        /// The name that failed to resolve.
        name: String,
        /// Comma-separated list of registered format names.
        available: String,
    },
}

/// Result type alias for formatter configuration.
pub type Result<T> = std::result::Result<T, FormatError>;
