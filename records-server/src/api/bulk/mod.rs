//! Bulk ingestion API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /bulk | POST | 批量写入解码后的表格行 (单事务) |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Bulk router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/bulk", post(handler::insert_many))
        .route("/bulk/", post(handler::insert_many))
}
