//! API error codes
//!
//! Standard error codes shared by server responses and client parsing.
//!
//! | 代码 | HTTP | 说明 |
//! |------|------|------|
//! | E0000 | 200/201 | 成功 |
//! | E0002 | 400 | 数据验证失败 (Invalid data) |
//! | E0003 | 404 | 资源不存在 |
//! | E0007 | 413 | 请求体过大 |
//! | E9001 | 500 | 内部错误 |
//! | E9002 | 500 | 数据库错误 |
//! | E9003 | 500 | 批量写入失败 |

use crate::http::StatusCode;

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Success
    Success,
    /// Validation error (400)
    Validation,
    /// Resource not found (404)
    NotFound,
    /// Request body over the size limit (413)
    PayloadTooLarge,
    /// Internal server error (500)
    Internal,
    /// Database error (500)
    Database,
    /// Batch insert failed (500)
    InsertFailed,
}

impl ApiErrorCode {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InsertFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the default message for this error
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Validation => "Invalid data",
            Self::NotFound => "Resource not found",
            Self::PayloadTooLarge => "Payload too large",
            Self::Internal => "Internal server error",
            Self::Database => "Database error",
            Self::InsertFailed => "Failed to insert records",
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::PayloadTooLarge => "E0007",
            Self::Internal => "E9001",
            Self::Database => "E9002",
            Self::InsertFailed => "E9003",
        }
    }

    /// Parse an error code string back into a code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "E0000" => Some(Self::Success),
            "E0002" => Some(Self::Validation),
            "E0003" => Some(Self::NotFound),
            "E0007" => Some(Self::PayloadTooLarge),
            "E9001" => Some(Self::Internal),
            "E9002" => Some(Self::Database),
            "E9003" => Some(Self::InsertFailed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
