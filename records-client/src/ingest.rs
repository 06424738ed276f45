//! Upload session: decoded rows, preview and submission state
//!
//! ```text
//! Idle ──load──▶ Ready ──submit──▶ Submitting ──▶ Succeeded (rows cleared)
//!                  ▲                            └─▶ Failed (rows kept)
//!                  └──────────── load / retry ◀──────────┘
//! ```

use std::path::Path;

use shared::models::Employee;

use crate::decoder::{self, DecodeError, DecodedRow, SpreadsheetFormat};
use crate::preview::Preview;
use crate::{ClientError, ClientResult, HttpClient};

/// How rows are sent to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMode {
    /// One `POST /bulk` carrying every row; all or nothing
    #[default]
    Bulk,
    /// One `POST /record/` per row; every row is attempted
    PerRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Nothing loaded
    #[default]
    Idle,
    /// Rows decoded, waiting for submission
    Ready,
    Submitting,
    /// Last submission stored every row
    Succeeded { inserted: usize },
    /// Last submission failed; the rows are still held
    Failed { message: String },
}

/// Outcome of a per-record submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerRecordReport {
    /// Ids of created records, in row order
    pub created: Vec<String>,
    /// (row index, reason) for every row the server refused
    pub failed: Vec<(usize, String)>,
}

impl PerRecordReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// Number of records the server stored
    pub inserted: usize,
    /// Record list fetched after the upload
    pub records: Vec<Employee>,
}

#[derive(Debug, Default)]
pub struct UploadSession {
    rows: Vec<DecodedRow>,
    preview: Preview,
    state: SubmissionState,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[DecodedRow] {
        &self.rows
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace the held rows with already decoded ones
    pub fn load_rows(&mut self, rows: Vec<DecodedRow>) {
        self.preview = Preview::from_rows(&rows);
        self.state = if rows.is_empty() {
            SubmissionState::Idle
        } else {
            SubmissionState::Ready
        };
        self.rows = rows;
    }

    /// Decode a workbook held in memory
    ///
    /// On error the session keeps its previous rows, preview and state.
    pub fn load_bytes(&mut self, bytes: &[u8], format: SpreadsheetFormat) -> Result<usize, DecodeError> {
        let rows = decoder::decode(bytes, format)?;
        let count = rows.len();
        self.load_rows(rows);
        Ok(count)
    }

    /// Decode a workbook file; same error behavior as [`Self::load_bytes`]
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, DecodeError> {
        let rows = decoder::decode_file(path)?;
        let count = rows.len();
        self.load_rows(rows);
        Ok(count)
    }

    /// Drop the held rows and return to `Idle`
    pub fn clear(&mut self) {
        self.rows.clear();
        self.preview = Preview::default();
        self.state = SubmissionState::Idle;
    }

    /// Submit the held rows in bulk
    ///
    /// Success clears the session and returns the refreshed record list;
    /// failure keeps every row so the same data can be submitted again.
    pub async fn submit(&mut self, client: &HttpClient) -> ClientResult<SubmitOutcome> {
        self.begin_submit()?;

        let result = match client.bulk_insert(&self.rows).await {
            Ok(result) => result,
            Err(e) => return Err(self.fail(e)),
        };
        tracing::info!(inserted = result.inserted, "Bulk upload committed");

        self.finish(client, result.inserted).await
    }

    /// Submit the held rows one request at a time
    ///
    /// Every row is attempted. Rows the server refused stay in the session
    /// and the state becomes `Failed`; if none failed the session is
    /// cleared like a bulk success. The record list is only refreshed
    /// when every row was stored.
    pub async fn submit_per_record(
        &mut self,
        client: &HttpClient,
    ) -> ClientResult<(PerRecordReport, Option<SubmitOutcome>)> {
        self.begin_submit()?;

        let mut report = PerRecordReport::default();
        for (index, row) in self.rows.iter().enumerate() {
            match client.create_record(row).await {
                Ok(record) => report.created.push(record.id),
                Err(e) => {
                    tracing::warn!(row = index, error = %e, "Record upload failed");
                    report.failed.push((index, e.to_string()));
                }
            }
        }

        if report.is_complete() {
            let outcome = self.finish(client, report.created.len()).await?;
            return Ok((report, Some(outcome)));
        }

        let failed_rows: Vec<DecodedRow> = report
            .failed
            .iter()
            .filter_map(|(index, _)| self.rows.get(*index).cloned())
            .collect();
        self.preview = Preview::from_rows(&failed_rows);
        self.rows = failed_rows;
        self.state = SubmissionState::Failed {
            message: format!(
                "{} of {} record(s) failed",
                report.failed.len(),
                report.failed.len() + report.created.len()
            ),
        };

        Ok((report, None))
    }

    /// Dispatch on `mode`; rows PerRecord could not store surface as
    /// [`ClientError::PartialUpload`] carrying the report
    pub async fn submit_with(
        &mut self,
        client: &HttpClient,
        mode: SubmitMode,
    ) -> ClientResult<SubmitOutcome> {
        match mode {
            SubmitMode::Bulk => self.submit(client).await,
            SubmitMode::PerRecord => match self.submit_per_record(client).await? {
                (_, Some(outcome)) => Ok(outcome),
                (report, None) => Err(ClientError::PartialUpload { report }),
            },
        }
    }

    fn begin_submit(&mut self) -> ClientResult<()> {
        if self.rows.is_empty() {
            return Err(ClientError::Validation {
                message: "No rows to upload".to_string(),
                violations: Vec::new(),
            });
        }
        self.state = SubmissionState::Submitting;
        Ok(())
    }

    fn fail(&mut self, error: ClientError) -> ClientError {
        tracing::warn!(error = %error, rows = self.rows.len(), "Upload failed");
        self.state = SubmissionState::Failed {
            message: error.to_string(),
        };
        error
    }

    /// Clear after a stored upload, then refresh the list
    ///
    /// The upload already succeeded when the refresh runs, so a refresh
    /// error leaves the session in `Succeeded`.
    async fn finish(&mut self, client: &HttpClient, inserted: usize) -> ClientResult<SubmitOutcome> {
        self.rows.clear();
        self.preview = Preview::default();
        self.state = SubmissionState::Succeeded { inserted };

        let records = client.list_records().await?;
        Ok(SubmitOutcome { inserted, records })
    }
}
