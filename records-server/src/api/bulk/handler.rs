//! Bulk ingestion handler
//!
//! 单次请求的处理流程：
//!
//! ```text
//! received → validating → rejected (400)
//!                       → inserting → committed (201)
//!                                   → failed (500, 事务回滚)
//! ```

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;
use shared::ApiResponse;
use shared::models::BulkInsertResult;

use crate::core::ServerState;
use crate::db::repository::employee;
use crate::utils::validation::validate_rows;
use crate::utils::{AppError, AppResult, created_with_message};

/// POST /bulk - insert every decoded row in one transaction
///
/// A body that is not a non-empty JSON array, or any row failing the
/// schema, is rejected before the store is touched. Bodies over
/// `MAX_BODY_BYTES` get 413.
pub async fn insert_many(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<BulkInsertResult>>)> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Bulk payload rejected");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::invalid_data()
        }
    })?;

    let rows = match body {
        Value::Array(rows) if !rows.is_empty() => rows,
        _ => {
            tracing::warn!("Bulk payload is not a non-empty array");
            return Err(AppError::invalid_data());
        }
    };

    let records = validate_rows(&rows).map_err(|violations| {
        tracing::warn!(
            rows = rows.len(),
            violations = violations.len(),
            "Bulk payload failed row validation"
        );
        AppError::InvalidRows(violations)
    })?;

    let ids = employee::insert_many(state.pool(), records)
        .await
        .map_err(|e| AppError::InsertFailed(e.to_string()))?;

    tracing::info!(inserted = ids.len(), "Bulk insert committed");

    Ok(created_with_message(
        BulkInsertResult {
            inserted: ids.len(),
            ids,
        },
        "Records inserted successfully",
    ))
}
