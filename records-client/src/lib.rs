//! Records Client - HTTP client and upload tooling for the records server
//!
//! - [`decoder`] - spreadsheet → rows
//! - [`preview`] - first rows as a table
//! - [`ingest`] - upload session and submission state
//! - [`view`] - record list selection / filters / search

pub mod cli;
pub mod config;
pub mod decoder;
pub mod error;
pub mod http;
pub mod ingest;
pub mod preview;
pub mod view;

pub use config::ClientConfig;
pub use decoder::{DecodeError, DecodedRow, SpreadsheetFormat, decode, decode_file};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use ingest::{PerRecordReport, SubmissionState, SubmitMode, SubmitOutcome, UploadSession};
pub use preview::{PREVIEW_LIMIT, Preview};
pub use view::{DeleteReport, RecordView};

// Re-export shared types for convenience
pub use shared::ApiResponse;
pub use shared::models::{BulkInsertResult, Employee, EmployeeUpdate, KNOWN_LEVELS, RowViolation};
