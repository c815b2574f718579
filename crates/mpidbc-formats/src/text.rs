//! Plain-text table formatter.

use std::io::{self, Write};

use mpidbc_models::{RankEndpoint, SessionInfo};

use crate::traits::{Formatter, FormatterInfo};

/// Gutter appended to every column.
const COLUMN_GAP: usize = 2;

/// Renders a session as `key=value` headers followed by an aligned
/// rank/hostname/port table.
pub struct TextFormatter {
    session: SessionInfo,
    endpoints: Vec<RankEndpoint>,
}

impl TextFormatter {
    /// Registry entry for this format.
    pub const INFO: FormatterInfo = FormatterInfo {
        name: "txt",
        description: "Simple human-readable plain-text format.",
    };

    /// Creates a formatter for the given session.
    pub fn new(session: SessionInfo) -> Self {
        Self {
            session,
            endpoints: Vec::new(),
        }
    }

    /// Registry constructor.
    pub fn construct(session: SessionInfo) -> Box<dyn Formatter> {
        Box::new(Self::new(session))
    }
}

/// Width of a left-justified column: the widest cell (header included)
/// plus the gutter.
fn column_width<I>(header: &str, values: I) -> usize
where
    I: IntoIterator<Item = String>,
{
    values
        .into_iter()
        .fold(header.len(), |width, value| width.max(value.len()))
        + COLUMN_GAP
}

impl Formatter for TextFormatter {
    fn session(&self) -> &SessionInfo {
        &self.session
    }

    fn add_endpoint(&mut self, endpoint: RankEndpoint) {
        self.endpoints.push(endpoint);
    }

    fn endpoints(&self) -> &[RankEndpoint] {
        &self.endpoints
    }

    fn write_config(&self, sink: &mut dyn Write) -> io::Result<()> {
        let session = &self.session;
        writeln!(sink, "config_name={}", session.config_name)?;
        writeln!(sink, "app_name={}", session.app_name)?;
        writeln!(
            sink,
            "source_dir={}",
            session.source_dir.as_deref().unwrap_or("")
        )?;

        let rank_width = column_width("Rank", self.endpoints.iter().map(|e| e.rank.to_string()));
        let host_width = column_width("Hostname", self.endpoints.iter().map(|e| e.host.clone()));
        let port_width = column_width("Port", self.endpoints.iter().map(|e| e.port.to_string()));

        writeln!(
            sink,
            "{:<rank_width$}{:<host_width$}{:<port_width$}",
            "Rank", "Hostname", "Port"
        )?;

        // Table order is endpoint arrival order; no sorting.
        for endpoint in &self.endpoints {
            writeln!(
                sink,
                "{:<rank_width$}{:<host_width$}{:<port_width$}",
                endpoint.rank, endpoint.host, endpoint.port
            )?;
        }

        Ok(())
    }
}
