//! Stream classifier and session builder for mpidb output.
//!
//! This crate turns the combined stdout of a multi-process debug session
//! into a populated configuration formatter. Lines announcing attach
//! points are consumed; everything else is forwarded unchanged, so the
//! filter can sit transparently inside an existing output pipeline.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//!
//! use mpidbc_core::{scan, ScanOptions};
//! use mpidbc_formats::FormatterRegistry;
//!
//! let registry = FormatterRegistry::with_builtins().unwrap();
//! let opts = ScanOptions {
//!     config_name: "debug".to_string(),
//!     source_dir: None,
//!     construct: registry.get("txt").unwrap().constructor(),
//! };
//!
//! let mut input = Cursor::new(b"mpidb(0): ./app 1\nmpidb(1): node1 4000\n".to_vec());
//! let mut forwarded = Vec::new();
//!
//! let formatter = scan(&mut input, &mut forwarded, &opts).unwrap().unwrap();
//! assert_eq!(formatter.endpoints().len(), 1);
//! ```

pub mod record;
pub mod scanner;

// Re-export main types
pub use record::{parse_record, Record};
pub use scanner::{scan, ScanOptions};
