//! Session metadata types.

use serde::{Deserialize, Serialize};

/// Metadata describing one debug-configuration-generation run.
///
/// Established exactly once, when rank 0's announcement is classified:
/// `app_name` and `expected_ranks` come from the stream, `config_name` and
/// `source_dir` from the caller. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Display name for the generated configuration.
    pub config_name: String,

    /// Path of the debugged application, as announced by rank 0.
    pub app_name: String,

    /// Number of attach points expected before the session is complete.
    pub expected_ranks: usize,

    /// Directory appended to the debugger's source search path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<String>,
}

impl SessionInfo {
    /// Creates session metadata without a source directory.
    pub fn new(
        config_name: impl Into<String>,
        app_name: impl Into<String>,
        expected_ranks: usize,
    ) -> Self {
        Self {
            config_name: config_name.into(),
            app_name: app_name.into(),
            expected_ranks,
            source_dir: None,
        }
    }

    /// Attaches a source directory.
    pub fn with_source_dir(mut self, source_dir: impl Into<String>) -> Self {
        self.source_dir = Some(source_dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_source_dir() {
        let session = SessionInfo::new("debug", "./app", 4);
        assert_eq!(session.config_name, "debug");
        assert_eq!(session.app_name, "./app");
        assert_eq!(session.expected_ranks, 4);
        assert!(session.source_dir.is_none());
    }

    #[test]
    fn test_with_source_dir() {
        let session = SessionInfo::new("debug", "./app", 2).with_source_dir("/src");
        assert_eq!(session.source_dir.as_deref(), Some("/src"));
    }
}
