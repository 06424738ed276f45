//! Employee record API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;
use shared::models::{Employee, EmployeeUpdate};

use crate::core::ServerState;
use crate::db::repository::employee;
use crate::utils::validation::{row_to_create, validate_update};
use crate::utils::{AppError, AppResult};

/// List all records in creation order
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let records = employee::find_all(state.pool()).await?;
    Ok(Json(records))
}

/// Get record by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let record = employee::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {}", id)))?;
    Ok(Json(record))
}

/// Create a single record
///
/// The body is checked with the same row schema as a bulk upload.
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let Json(value) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected record body");
        AppError::invalid_data()
    })?;

    let data = row_to_create(0, &value).map_err(AppError::InvalidRows)?;
    let record = employee::create(state.pool(), data).await?;

    tracing::info!(id = %record.id, "Employee record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Partially update a record
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> AppResult<Json<Employee>> {
    let Json(mut payload) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected record update body");
        AppError::invalid_data()
    })?;
    validate_update(&payload)?;

    for field in [&mut payload.name, &mut payload.position, &mut payload.level] {
        if let Some(value) = field {
            *value = value.trim().to_string();
        }
    }

    let record = employee::update(state.pool(), &id, payload).await?;
    Ok(Json(record))
}

/// Hard delete a record
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    if !employee::delete(state.pool(), &id).await? {
        return Err(AppError::not_found(format!("Employee {}", id)));
    }

    tracing::info!(id = %id, "Employee record deleted");
    Ok(Json(true))
}
