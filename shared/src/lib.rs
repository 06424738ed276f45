//! Shared types for the employee records service
//!
//! Wire types used by both `records-server` and `records-client`:
//! record models, the bulk ingestion payload/result types, and the
//! unified API response envelope.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use error::ApiErrorCode;
pub use http;
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
