//! Configuration formatters for debugger attach sessions.
//!
//! This crate provides a unified interface for rendering a completed debug
//! session into a target-tool-specific configuration document through the
//! `Formatter` trait.
//!
//! # Key Concepts
//!
//! - **Formatter**: Trait that all configuration formats implement
//! - **FormatterRegistry**: Discovers and constructs available formats
//! - **Built-ins**: a plain-text table (`txt`) and a VS Code launch
//!   configuration (`vscode`)
//!
//! # Example
//!
//! ```
//! use mpidbc_formats::FormatterRegistry;
//! use mpidbc_models::{RankEndpoint, SessionInfo};
//!
//! let registry = FormatterRegistry::with_builtins().unwrap();
//!
//! // List available formats
//! for info in registry.list() {
//!     println!("{}: {}", info.name, info.description);
//! }
//!
//! // Construct a formatter and render a session
//! let entry = registry.get("txt").unwrap();
//! let mut formatter = entry.construct(SessionInfo::new("debug", "./app", 1));
//! formatter.add_endpoint(RankEndpoint::new(1, "node1", 4000));
//!
//! let mut rendered = Vec::new();
//! formatter.write_config(&mut rendered).unwrap();
//! ```

pub mod error;
pub mod registry;
pub mod text;
pub mod traits;
pub mod vscode;

pub use error::{FormatError, Result};
pub use registry::{FormatEntry, FormatterRegistry};
pub use text::TextFormatter;
pub use traits::{Formatter, FormatterCtor, FormatterInfo};
pub use vscode::VsCodeFormatter;
