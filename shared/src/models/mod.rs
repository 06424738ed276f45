//! Data models
//!
//! Shared between records-server and records-client (via API).

pub mod bulk;
pub mod employee;

// Re-exports
pub use bulk::*;
pub use employee::*;
