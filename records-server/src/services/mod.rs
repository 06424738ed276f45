//! 服务模块
//!
//! - [`http`] - 路由组装、中间件、HTTP 监听

pub mod http;

pub use http::{build_app, build_router, serve};
