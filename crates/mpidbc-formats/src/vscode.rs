//! VS Code launch-configuration formatter.
//!
//! Produces a `launch.json`-shaped document with one attach entry per rank
//! and a compound entry that starts every rank at once.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use mpidbc_models::{RankEndpoint, SessionInfo};

use crate::traits::{Formatter, FormatterInfo};

/// The complete launch document.
#[derive(Debug, Serialize)]
struct LaunchDocument {
    version: &'static str,
    compounds: Vec<Compound>,
    configurations: Vec<DebugEntry>,
}

/// Compound entry referencing every per-rank configuration by name.
#[derive(Debug, Serialize)]
struct Compound {
    name: String,
    configurations: Vec<String>,
}

/// One per-rank attach configuration.
///
/// Field order is the serialization order, kept stable for reproducible
/// output.
#[derive(Debug, Serialize)]
struct DebugEntry {
    name: String,
    program: String,
    #[serde(rename = "miDebuggerServerAddress")]
    mi_debugger_server_address: String,
    #[serde(rename = "type")]
    kind: &'static str,
    request: &'static str,
    args: Vec<String>,
    #[serde(rename = "stopAtEntry")]
    stop_at_entry: bool,
    cwd: &'static str,
    environment: Vec<String>,
    #[serde(rename = "externalConsole")]
    external_console: bool,
    #[serde(rename = "MIMode")]
    mi_mode: &'static str,
    #[serde(rename = "setupCommands")]
    setup_commands: Vec<SetupCommand>,
}

/// One debugger directive issued before attaching.
#[derive(Debug, Serialize)]
struct SetupCommand {
    text: String,
    #[serde(rename = "ignoreFailures", skip_serializing_if = "Option::is_none")]
    ignore_failures: Option<bool>,
}

impl SetupCommand {
    /// A directive whose failure is tolerated.
    fn ignoring_failures(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ignore_failures: Some(true),
        }
    }

    /// A directive that must succeed.
    fn required(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ignore_failures: None,
        }
    }
}

/// Renders a session as a VS Code multi-process launch configuration.
pub struct VsCodeFormatter {
    session: SessionInfo,
    endpoints: Vec<RankEndpoint>,
}

impl VsCodeFormatter {
    /// Registry entry for this format.
    pub const INFO: FormatterInfo = FormatterInfo {
        name: "vscode",
        description: "Creates launch configuration file for Visual Studio Code. Usually, named \
                      'launch.json' and placed in the '.vscode' directory in your workspace \
                      folder. Allows for spawning of multiple concurrent debugging sessions via \
                      compound configurations. The compound configuration has the suffix 'all \
                      ranks'.",
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

    fn entry_name(&self, endpoint: &RankEndpoint) -> String {
        format!("{} rank {}", self.session.config_name, endpoint.rank)
    }

    /// The fixed gdb preamble, plus the source-directory directive when a
    /// source directory was supplied.
    fn setup_commands(&self) -> Vec<SetupCommand> {
        let mut commands = vec![
            SetupCommand::ignoring_failures("-enable-pretty-printing"),
            SetupCommand::required(format!("file {}", self.session.app_name)),
            SetupCommand::ignoring_failures("break _gfortran_runtime_error_at"),
            SetupCommand::ignoring_failures("break _Unwind_Backtrace"),
        ];
        if let Some(source_dir) = &self.session.source_dir {
            commands.push(SetupCommand::ignoring_failures(format!(
                "directory {}",
                source_dir
            )));
        }
        commands
    }

    fn entry_for(&self, endpoint: &RankEndpoint) -> DebugEntry {
        DebugEntry {
            name: self.entry_name(endpoint),
            program: self.session.app_name.clone(),
            mi_debugger_server_address: endpoint.address(),
            kind: "cppdbg",
            request: "launch",
            args: Vec::new(),
            stop_at_entry: false,
            cwd: "${workspaceRoot}",
            environment: Vec::new(),
            external_console: true,
            mi_mode: "gdb",
            setup_commands: self.setup_commands(),
        }
    }
}

impl Formatter for VsCodeFormatter {
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
        let document = LaunchDocument {
            version: "0.2.0",
            compounds: vec![Compound {
                name: format!("{} all ranks", self.session.config_name),
                configurations: self
                    .endpoints
                    .iter()
                    .map(|endpoint| self.entry_name(endpoint))
                    .collect(),
            }],
            configurations: self
                .endpoints
                .iter()
                .map(|endpoint| self.entry_for(endpoint))
                .collect(),
        };

        let mut serializer =
            serde_json::Serializer::with_formatter(sink, PrettyFormatter::with_indent(b"    "));
        document.serialize(&mut serializer)?;
        Ok(())
    }
}
