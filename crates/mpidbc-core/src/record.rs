//! Classification of mpidb protocol lines.
//!
//! The launcher marks every record it prints with `mpidb(<rank>):`,
//! possibly embedded in surrounding launcher noise:
//! ```text
//! mpidb(0): ./app 4
//! [node17] mpidb(2): node17 34612
//! ```
//!
//! Classification is deliberately permissive: the marker may sit anywhere
//! in the line, text before it is ignored, and any line that does not
//! fully parse is opaque rather than an error.

use std::sync::LazyLock;

use regex::Regex;

use mpidbc_models::RankEndpoint;

/// Matches `mpidb(<rank>):` anywhere in the line.
static RANK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"mpidb\((\d+)\):").expect("invalid rank regex"));

/// A protocol record recovered from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Rank 0's announcement of the session: the application being
    /// debugged and the number of attach points to expect.
    SessionInit {
        app_name: String,
        expected_ranks: usize,
    },

    /// One rank's attach point.
    Endpoint(RankEndpoint),
}

/// Classifies one input line.
///
/// The whitespace tokens after the `mpidb(<rank>):` marker are the
/// record's payload. Returns `None` for opaque lines: no marker, an
/// unparseable rank, or too few / unparseable payload tokens. Opaque
/// lines must be forwarded verbatim by the caller.
///
/// `initialized` selects the payload shape for rank 0: before the session
/// exists a rank-0 line carries `app_name expected_ranks`, afterwards it
/// is read as an ordinary `host port` endpoint like every other rank.
pub fn parse_record(line: &str, initialized: bool) -> Option<Record> {
    let captures = RANK_REGEX.captures(line)?;
    let rank: u32 = captures.get(1)?.as_str().parse().ok()?;

    let payload = &line[captures.get(0)?.end()..];
    let mut words = payload.split_whitespace();

    if rank == 0 && !initialized {
        let app_name = words.next()?.to_string();
        let expected_ranks = words.next()?.parse().ok()?;
        Some(Record::SessionInit {
            app_name,
            expected_ranks,
        })
    } else {
        let host = words.next()?.to_string();
        let port = words.next()?.parse().ok()?;
        Some(Record::Endpoint(RankEndpoint::new(rank, host, port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_init() {
        let record = parse_record("mpidb(0): ./appA 4", false).unwrap();
        assert_eq!(
            record,
            Record::SessionInit {
                app_name: "./appA".to_string(),
                expected_ranks: 4,
            }
        );
    }

    #[test]
    fn test_endpoint() {
        let record = parse_record("mpidb(3): node17 34612", false).unwrap();
        assert_eq!(
            record,
            Record::Endpoint(RankEndpoint::new(3, "node17", 34612))
        );
    }

    #[test]
    fn test_attached_prefix_is_ignored() {
        let record = parse_record("xmpidb(1): 10.0.0.1 5000", false).unwrap();
        assert_eq!(
            record,
            Record::Endpoint(RankEndpoint::new(1, "10.0.0.1", 5000))
        );
    }

    #[test]
    fn test_marker_after_other_tokens_is_still_a_record() {
        let record = parse_record("[node17] mpidb(2): node17 34612", false).unwrap();
        assert_eq!(
            record,
            Record::Endpoint(RankEndpoint::new(2, "node17", 34612))
        );
    }

    #[test]
    fn test_rank_zero_after_init_is_an_endpoint() {
        let record = parse_record("mpidb(0): node0 4000", true).unwrap();
        assert_eq!(record, Record::Endpoint(RankEndpoint::new(0, "node0", 4000)));
    }

    #[test]
    fn test_extra_payload_tokens_are_ignored() {
        let record = parse_record("mpidb(0): ./appA 2 trailing words", false).unwrap();
        assert_eq!(
            record,
            Record::SessionInit {
                app_name: "./appA".to_string(),
                expected_ranks: 2,
            }
        );
    }

    #[test]
    fn test_plain_text_is_opaque() {
        assert_eq!(parse_record("noise line", false), None);
        assert_eq!(parse_record("", false), None);
        assert_eq!(parse_record("   ", false), None);
    }

    #[test]
    fn test_malformed_near_records_are_opaque() {
        // No colon after the rank digits.
        assert_eq!(parse_record("mpidb(1) node1 4000", false), None);
        // Non-numeric rank.
        assert_eq!(parse_record("mpidb(one): node1 4000", false), None);
        // Rank digits overflow u32.
        assert_eq!(parse_record("mpidb(99999999999): node1 4000", false), None);
        // Too few payload tokens.
        assert_eq!(parse_record("mpidb(1): node1", false), None);
        assert_eq!(parse_record("mpidb(0):", false), None);
        // Unparseable port.
        assert_eq!(parse_record("mpidb(1): node1 port", false), None);
        assert_eq!(parse_record("mpidb(1): node1 70000", false), None);
        // Unparseable rank count.
        assert_eq!(parse_record("mpidb(0): ./appA many", false), None);
    }

    #[test]
    fn test_first_matching_marker_wins() {
        let record = parse_record("mpidb(one): mpidb(2): node2 4001", false).unwrap();
        assert_eq!(
            record,
            Record::Endpoint(RankEndpoint::new(2, "node2", 4001))
        );
    }
}
