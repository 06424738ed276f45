//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举，实现 `IntoResponse`
//! - [`ok_with_message`] / [`created_with_message`] - 成功响应
//!
//! # 错误码规范
//!
//! | 代码 | HTTP | 说明 |
//! |------|------|------|
//! | E0002 | 400 | 数据验证失败 ("Invalid data") |
//! | E0003 | 404 | 资源不存在 |
//! | E0007 | 413 | 请求体超过 MAX_BODY_BYTES |
//! | E9001 | 500 | 内部错误 |
//! | E9002 | 500 | 数据库错误 |
//! | E9003 | 500 | 批量写入失败 ("Failed to insert records") |
//!
//! 5xx 错误只在日志中记录详细信息，响应体只返回固定文案。
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Employee abc"))
//!
//! // 返回成功响应
//! Ok(ok_with_message(data, "Records inserted successfully"))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::models::RowViolation;
use shared::{ApiErrorCode, ApiResponse};
use tracing::error;

use crate::db::repository::RepoError;

/// 应用错误枚举
///
/// | 分类 | 说明 |
/// |------|------|
/// | 业务错误 | 资源不存在、验证失败、逐行校验失败 |
/// | 系统错误 | 数据库错误、批量写入失败、内部错误 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    /// 逐行校验失败 (400)，携带违规行列表
    InvalidRows(Vec<RowViolation>),

    #[error("Request body exceeds the size limit")]
    /// 请求体过大 (413)
    PayloadTooLarge,

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Bulk insert failed: {0}")]
    /// 批量写入失败 (500)
    InsertFailed(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(format!("{} not found", resource.into()))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// 请求体不是非空数组时的统一错误
    pub fn invalid_data() -> Self {
        Self::Validation(ApiErrorCode::Validation.default_message().to_string())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Error code reported to the caller
    pub fn code(&self) -> ApiErrorCode {
        match self {
            AppError::NotFound(_) => ApiErrorCode::NotFound,
            AppError::Validation(_) | AppError::InvalidRows(_) => ApiErrorCode::Validation,
            AppError::PayloadTooLarge => ApiErrorCode::PayloadTooLarge,
            AppError::Database(_) => ApiErrorCode::Database,
            AppError::InsertFailed(_) => ApiErrorCode::InsertFailed,
            AppError::Internal(_) => ApiErrorCode::Internal,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = code.status_code();

        match self {
            AppError::InvalidRows(violations) => {
                let body = ApiResponse::error_with_data(code, code.default_message(), violations);
                (status, Json(body)).into_response()
            }
            other => {
                let message = match &other {
                    AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
                    AppError::Database(msg) => {
                        error!(target: "database", error = %msg, "Database error occurred");
                        code.default_message().to_string()
                    }
                    AppError::InsertFailed(msg) => {
                        error!(target: "database", error = %msg, "Bulk insert failed");
                        code.default_message().to_string()
                    }
                    AppError::Internal(msg) => {
                        error!(target: "internal", error = %msg, "Internal error occurred");
                        code.default_message().to_string()
                    }
                    AppError::PayloadTooLarge | AppError::InvalidRows(_) => {
                        code.default_message().to_string()
                    }
                };
                (status, Json(ApiResponse::<()>::error(code, message))).into_response()
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper functions ==========

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok_with_message(data, message))
}

/// Create a `201 Created` response with custom message
pub fn created_with_message<T: Serialize>(
    data: T,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, ok_with_message(data, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_data_body() {
        let (status, body) = body_json(AppError::invalid_data()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "code": "E0002", "message": "Invalid data" }));
    }

    #[tokio::test]
    async fn test_payload_too_large_body() {
        let (status, body) = body_json(AppError::PayloadTooLarge).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, json!({ "code": "E0007", "message": "Payload too large" }));
    }

    #[tokio::test]
    async fn test_insert_failure_hides_details() {
        let (status, body) =
            body_json(AppError::InsertFailed("UNIQUE constraint failed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to insert records");
        assert!(!body.to_string().contains("UNIQUE"));
    }

    #[tokio::test]
    async fn test_invalid_rows_carry_violations() {
        let err = AppError::InvalidRows(vec![RowViolation::new(1, "name", "is required")]);
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid data");
        assert_eq!(body["data"][0]["row"], 1);
        assert_eq!(body["data"][0]["field"], "name");
    }
}
