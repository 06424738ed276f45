//! Employee record API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /record/ | GET | 列出全部记录 (按创建顺序) |
//! | /record/ | POST | 创建单条记录 |
//! | /record/{id} | GET | 获取记录 |
//! | /record/{id} | PATCH | 部分更新 |
//! | /record/{id} | DELETE | 删除记录 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Record router
///
/// axum 不做尾斜杠归一化，两种写法都注册
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/record", get(handler::list).post(handler::create))
        .route("/record/", get(handler::list).post(handler::create))
        .route(
            "/record/{id}",
            get(handler::get_by_id).patch(handler::update).delete(handler::delete),
        )
        .route(
            "/record/{id}/",
            get(handler::get_by_id).patch(handler::update).delete(handler::delete),
        )
}
