//! The stream scanner: forwards opaque lines and assembles the session.

use std::io::{self, BufRead, Write};
use std::str;

use tracing::{debug, info};

use mpidbc_formats::{Formatter, FormatterCtor};
use mpidbc_models::{RankEndpoint, SessionInfo};

use crate::record::{parse_record, Record};

/// Options controlling one scan.
pub struct ScanOptions {
    /// Display name for the generated configuration.
    pub config_name: String,
    /// Optional source directory forwarded to the formatter.
    pub source_dir: Option<String>,
    /// Constructor for the selected format, from the registry.
    pub construct: FormatterCtor,
}

/// Accumulates attach points before and after the session is known.
///
/// Endpoints seen before rank 0's announcement are buffered, then replayed
/// into the formatter in arrival order the moment it is constructed. The
/// buffer is never consulted again after the flush.
enum Accumulator {
    Buffering(Vec<RankEndpoint>),
    Attached(Box<dyn Formatter>),
}

impl Accumulator {
    fn is_attached(&self) -> bool {
        matches!(self, Accumulator::Attached(_))
    }

    fn push(&mut self, endpoint: RankEndpoint) {
        match self {
            Accumulator::Buffering(pending) => pending.push(endpoint),
            Accumulator::Attached(formatter) => formatter.add_endpoint(endpoint),
        }
    }

    /// Hands the formatter out once it exists and every expected endpoint
    /// has arrived; otherwise returns the accumulator unchanged.
    fn try_finish(self, received: usize) -> Result<Box<dyn Formatter>, Accumulator> {
        match self {
            Accumulator::Attached(formatter)
                if formatter.session().expected_ranks == received =>
            {
                Ok(formatter)
            }
            pending => Err(pending),
        }
    }
}

/// Scans `input` until the session is fully announced.
///
/// Every line that is not a protocol record is written to `forward`
/// immediately, byte-exact and in original order. Protocol records build
/// the session: rank 0's announcement constructs the formatter (flushing
/// any buffered endpoints into it), endpoint records are appended in
/// arrival order.
///
/// Returns as soon as the formatter exists and holds the announced number
/// of endpoints, without reading further input; lines after that point are
/// left in `input` for the caller's pass-through phase. Returns `Ok(None)`
/// when `input` ends first; partial state is discarded.
pub fn scan<R, W>(
    input: &mut R,
    forward: &mut W,
    opts: &ScanOptions,
) -> io::Result<Option<Box<dyn Formatter>>>
where
    R: BufRead,
    W: Write,
{
    let mut acc = Accumulator::Buffering(Vec::new());
    let mut received = 0usize;
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }

        // Classification only applies to valid UTF-8; anything else is
        // opaque and still forwarded byte-exact.
        let record = str::from_utf8(&raw)
            .ok()
            .and_then(|line| parse_record(line, acc.is_attached()));

        let record = match record {
            Some(record) => record,
            None => {
                forward.write_all(&raw)?;
                forward.flush()?;
                continue;
            }
        };

        match record {
            Record::SessionInit {
                app_name,
                expected_ranks,
            } => {
                info!(app_name = %app_name, expected_ranks, "session announced");
                let mut session =
                    SessionInfo::new(opts.config_name.clone(), app_name, expected_ranks);
                session.source_dir = opts.source_dir.clone();

                let mut formatter = (opts.construct)(session);
                if let Accumulator::Buffering(pending) = &mut acc {
                    for endpoint in pending.drain(..) {
                        formatter.add_endpoint(endpoint);
                    }
                }
                acc = Accumulator::Attached(formatter);
            }
            Record::Endpoint(endpoint) => {
                debug!(
                    rank = endpoint.rank,
                    host = %endpoint.host,
                    port = endpoint.port,
                    "endpoint announced"
                );
                received += 1;
                acc.push(endpoint);
            }
        }

        match acc.try_finish(received) {
            Ok(formatter) => {
                info!(endpoints = received, "session complete");
                return Ok(Some(formatter));
            }
            Err(pending) => acc = pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use mpidbc_formats::FormatterRegistry;

    use super::*;

    fn txt_options() -> ScanOptions {
        let registry = FormatterRegistry::with_builtins().unwrap();
        ScanOptions {
            config_name: "dbg".to_string(),
            source_dir: None,
            construct: registry.get("txt").unwrap().constructor(),
        }
    }

    fn scan_str(input: &str) -> (Option<Box<dyn Formatter>>, String, Cursor<Vec<u8>>) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut forwarded = Vec::new();
        let formatter = scan(&mut reader, &mut forwarded, &txt_options()).unwrap();
        (formatter, String::from_utf8(forwarded).unwrap(), reader)
    }

    #[test]
    fn test_init_first_then_endpoints() {
        let (formatter, forwarded, _) =
            scan_str("mpidb(0): ./appA 2\nmpidb(1): node1 4000\nmpidb(2): node2 4001\n");
        let formatter = formatter.unwrap();

        assert_eq!(forwarded, "");
        assert_eq!(formatter.session().app_name, "./appA");
        assert_eq!(
            formatter.endpoints(),
            &[
                RankEndpoint::new(1, "node1", 4000),
                RankEndpoint::new(2, "node2", 4001),
            ]
        );
    }

    #[test]
    fn test_endpoints_before_init_are_buffered_in_order() {
        let (formatter, _, _) =
            scan_str("mpidb(2): node2 4001\nmpidb(1): node1 4000\nmpidb(0): ./appA 2\n");
        let formatter = formatter.unwrap();

        // Buffer round-trip preserves arrival order, not rank order.
        assert_eq!(
            formatter.endpoints(),
            &[
                RankEndpoint::new(2, "node2", 4001),
                RankEndpoint::new(1, "node1", 4000),
            ]
        );
    }

    #[test]
    fn test_opaque_lines_forward_in_order() {
        let (formatter, forwarded, _) = scan_str(
            "first noise\nmpidb(0): ./appA 1\nsecond noise\nmpidb(1): node1 4000\n",
        );

        assert!(formatter.is_some());
        assert_eq!(forwarded, "first noise\nsecond noise\n");
    }

    #[test]
    fn test_stops_reading_the_instant_session_completes() {
        let (formatter, forwarded, mut reader) = scan_str(
            "mpidb(0): ./appA 1\nmpidb(1): node1 4000\nmpidb(2): node2 4001\ntrailing\n",
        );

        let formatter = formatter.unwrap();
        assert_eq!(formatter.endpoints().len(), 1);
        assert_eq!(forwarded, "");

        // Lines after completion are left untouched in the reader, even
        // record-shaped ones.
        let mut rest = String::new();
        std::io::Read::read_to_string(&mut reader, &mut rest).unwrap();
        assert_eq!(rest, "mpidb(2): node2 4001\ntrailing\n");
    }

    #[test]
    fn test_zero_rank_session_completes_immediately() {
        let (formatter, _, mut reader) = scan_str("mpidb(0): ./appA 0\nleftover\n");

        let formatter = formatter.unwrap();
        assert!(formatter.endpoints().is_empty());

        let mut rest = String::new();
        std::io::Read::read_to_string(&mut reader, &mut rest).unwrap();
        assert_eq!(rest, "leftover\n");
    }

    #[test]
    fn test_eof_before_completion_returns_none() {
        let (formatter, forwarded, _) = scan_str("mpidb(0): ./appA 3\nmpidb(1): node1 4000\n");

        assert!(formatter.is_none());
        assert_eq!(forwarded, "");
    }

    #[test]
    fn test_eof_with_no_records_returns_none() {
        let (formatter, forwarded, _) = scan_str("just\nnoise\n");

        assert!(formatter.is_none());
        assert_eq!(forwarded, "just\nnoise\n");
    }

    #[test]
    fn test_repeated_rank_zero_counts_as_endpoint() {
        let (formatter, _, _) =
            scan_str("mpidb(0): ./appA 2\nmpidb(0): node0 4000\nmpidb(1): node1 4001\n");
        let formatter = formatter.unwrap();

        // A second rank-0 record never reinitializes the session.
        assert_eq!(formatter.session().expected_ranks, 2);
        assert_eq!(
            formatter.endpoints(),
            &[
                RankEndpoint::new(0, "node0", 4000),
                RankEndpoint::new(1, "node1", 4001),
            ]
        );
    }

    #[test]
    fn test_malformed_records_forward_and_do_not_count() {
        let (formatter, forwarded, _) = scan_str(
            "mpidb(1): node1\nmpidb(0): ./appA 1\nmpidb(one): node9 4009\nmpidb(1): node1 4000\n",
        );

        let formatter = formatter.unwrap();
        assert_eq!(forwarded, "mpidb(1): node1\nmpidb(one): node9 4009\n");
        assert_eq!(formatter.endpoints(), &[RankEndpoint::new(1, "node1", 4000)]);
    }

    #[test]
    fn test_line_without_trailing_newline_still_forwards() {
        let (formatter, forwarded, _) = scan_str("noise without newline");

        assert!(formatter.is_none());
        assert_eq!(forwarded, "noise without newline");
    }

    #[test]
    fn test_non_utf8_line_is_forwarded_byte_exact() {
        let mut input = Vec::new();
        input.extend_from_slice(b"\xff\xfe raw bytes\n");
        input.extend_from_slice(b"mpidb(0): ./appA 0\n");

        let mut reader = Cursor::new(input);
        let mut forwarded = Vec::new();
        let formatter = scan(&mut reader, &mut forwarded, &txt_options()).unwrap();

        assert!(formatter.is_some());
        assert_eq!(forwarded, b"\xff\xfe raw bytes\n");
    }

    #[test]
    fn test_source_dir_reaches_the_formatter() {
        let registry = FormatterRegistry::with_builtins().unwrap();
        let opts = ScanOptions {
            config_name: "dbg".to_string(),
            source_dir: Some("/src".to_string()),
            construct: registry.get("txt").unwrap().constructor(),
        };

        let mut reader = Cursor::new(b"mpidb(0): ./appA 0\n".to_vec());
        let mut forwarded = Vec::new();
        let formatter = scan(&mut reader, &mut forwarded, &opts).unwrap().unwrap();

        assert_eq!(formatter.session().source_dir.as_deref(), Some("/src"));
    }
}
