//! Core data models for mpidbc.
//!
//! This crate provides the fundamental data types shared by the stream
//! scanner and the configuration formatters: the attach point announced
//! by each worker rank, and the metadata describing a debug session.

pub mod endpoint;
pub mod session;

// Re-export main types
pub use endpoint::RankEndpoint;
pub use session::SessionInfo;
