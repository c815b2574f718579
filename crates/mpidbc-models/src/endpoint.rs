//! Attach-point types.

use serde::{Deserialize, Serialize};

/// The network location where one worker rank waits for a debugger attach.
///
/// Created the instant its announcement line is classified; never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEndpoint {
    /// Zero-based rank of the worker process in the parallel job.
    pub rank: u32,

    /// Hostname the rank's debugger server is listening on.
    pub host: String,

    /// TCP port of the rank's debugger server.
    pub port: u16,
}

impl RankEndpoint {
    /// Creates a new attach point.
    pub fn new(rank: u32, host: impl Into<String>, port: u16) -> Self {
        Self {
            rank,
            host: host.into(),
            port,
        }
    }

    /// Returns the `host:port` address in the form debugger frontends expect.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
