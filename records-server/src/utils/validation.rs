//! Input validation helpers
//!
//! Centralized text length constants and the row schema applied to
//! uploaded spreadsheet rows before anything reaches the store.
//! SQLite TEXT has no built-in length enforcement.

use serde_json::{Map, Value};
use shared::models::{EmployeeCreate, EmployeeUpdate, RESERVED_FIELDS, RowViolation};

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names and positions, in characters
pub const MAX_NAME_LEN: usize = 200;

/// Level labels (Intern, Junior, Senior, ...), in characters
pub const MAX_LEVEL_LEN: usize = 100;

/// Columns every employee row must carry
const REQUIRED_COLUMNS: [&str; 3] = ["name", "position", "level"];

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    let chars = value.chars().count();
    if chars > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({chars} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is non-empty and within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_required_text(v, field, max_len),
        None => Ok(()),
    }
}

/// Validate a partial update: at least one field, none of them blank.
pub fn validate_update(update: &EmployeeUpdate) -> Result<(), AppError> {
    if update.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }
    validate_optional_text(&update.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&update.position, "position", MAX_NAME_LEN)?;
    validate_optional_text(&update.level, "level", MAX_LEVEL_LEN)?;
    Ok(())
}

// ── Row schema (bulk + single create) ───────────────────────────────

/// Coerce a cell to trimmed text.
///
/// Spreadsheet numbers arrive as JSON numbers and are accepted as text;
/// booleans, arrays and objects are not.
fn cell_text(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err("must be text"),
    }
}

/// Check one decoded row against the employee schema.
///
/// `row` is the index of the row inside the payload and is only used to
/// label violations. Reserved columns are dropped, unknown columns are kept
/// in `extra`.
pub fn row_to_create(row: usize, value: &Value) -> Result<EmployeeCreate, Vec<RowViolation>> {
    let Some(object) = value.as_object() else {
        return Err(vec![RowViolation::new(row, "*", "must be an object")]);
    };

    let mut violations = Vec::new();
    let mut field_text = |field: &str, max_len: usize| -> Option<String> {
        let reason = match object.get(field).map(cell_text) {
            None => "is required".to_string(),
            Some(Err(reason)) => reason.to_string(),
            Some(Ok(text)) if text.is_empty() => "is required".to_string(),
            Some(Ok(text)) if text.chars().count() > max_len => {
                format!("is too long (max {max_len} chars)")
            }
            Some(Ok(text)) => return Some(text),
        };
        violations.push(RowViolation::new(row, field, reason));
        None
    };

    let name = field_text("name", MAX_NAME_LEN);
    let position = field_text("position", MAX_NAME_LEN);
    let level = field_text("level", MAX_LEVEL_LEN);

    let (Some(name), Some(position), Some(level)) = (name, position, level) else {
        return Err(violations);
    };

    let extra: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| {
            !REQUIRED_COLUMNS.contains(&key.as_str()) && !RESERVED_FIELDS.contains(&key.as_str())
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(EmployeeCreate {
        name,
        position,
        level,
        extra,
    })
}

/// Validate every row; all violations are collected before returning.
pub fn validate_rows(rows: &[Value]) -> Result<Vec<EmployeeCreate>, Vec<RowViolation>> {
    let mut records = Vec::with_capacity(rows.len());
    let mut violations = Vec::new();

    for (index, value) in rows.iter().enumerate() {
        match row_to_create(index, value) {
            Ok(record) => records.push(record),
            Err(mut errs) => violations.append(&mut errs),
        }
    }

    if violations.is_empty() {
        Ok(records)
    } else {
        Err(violations)
    }
}
