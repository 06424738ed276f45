//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`records`] - 员工记录 CRUD
//! - [`bulk`] - 表格批量导入

pub mod bulk;
pub mod health;
pub mod records;

// Re-export common types for handlers
pub use crate::utils::AppResult;
