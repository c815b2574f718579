//! mpidbc CLI library.
//!
//! This crate wires the stream scanner and the formatter registry into a
//! command-line filter: parse arguments, scan stdin, write the selected
//! configuration file, forward everything else to stdout.

pub mod cli;
pub mod run;
pub mod signals;
