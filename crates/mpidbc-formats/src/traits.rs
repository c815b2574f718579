//! Core trait for configuration formatters.
//!
//! The `Formatter` trait defines the interface that all configuration
//! formats must implement. This allows the stream scanner to feed any
//! format through a unified interface, and new formats to be added
//! without touching the parser.

use std::io::{self, Write};

use mpidbc_models::{RankEndpoint, SessionInfo};

/// Information about a configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterInfo {
    /// Unique name used to select the format on the command line.
    pub name: &'static str,
    /// Human-readable description for help output.
    pub description: &'static str,
}

/// Constructor signature stored in the registry.
pub type FormatterCtor = fn(SessionInfo) -> Box<dyn Formatter>;

/// Trait implemented by all configuration formatters.
///
/// A formatter is constructed from a [`SessionInfo`] once rank 0's
/// announcement has been seen, collects attach points in arrival order,
/// and renders one target-tool-specific configuration document.
///
/// Endpoint order is preserved exactly as recorded; implementations must
/// not sort.
pub trait Formatter {
    /// Session metadata this formatter was constructed from.
    fn session(&self) -> &SessionInfo;

    /// Records one rank's attach point.
    fn add_endpoint(&mut self, endpoint: RankEndpoint);

    /// Attach points recorded so far, in arrival order.
    fn endpoints(&self) -> &[RankEndpoint];

    /// Renders the configuration document to `sink`.
    ///
    /// A session with zero ranks must render gracefully (headers-only
    /// table, empty configuration list).
    fn write_config(&self, sink: &mut dyn Write) -> io::Result<()>;
}
