//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - [`AppResult`] - 处理器 Result 别名
//! - 日志、输入校验

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, created_with_message, ok_with_message};
pub use result::AppResult;
pub use shared::{ApiErrorCode, ApiResponse};
