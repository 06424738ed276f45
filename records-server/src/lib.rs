//! Records Server - 员工记录服务
//!
//! # 架构概述
//!
//! - **HTTP API** (`api`): 记录 CRUD、表格批量导入、健康检查
//! - **数据库** (`db`): SQLite (sqlx) 记录存储，批量写入单事务
//! - **校验** (`utils::validation`): 上传行的字段规则
//!
//! # 模块结构
//!
//! ```text
//! records-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── services/      # 路由组装、HTTP 监听
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、校验
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use utils::{AppError, AppResult};

// Re-export unified response types from shared
pub use utils::{ApiErrorCode, ApiResponse};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 设置运行环境
///
/// 1. 加载 `.env` (不存在时忽略)
/// 2. 读取配置
/// 3. 初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____                        __
   / __ \___  _________  _________/ /____
  / /_/ / _ \/ ___/ __ \/ ___/ __  / ___/
 / _, _/  __/ /__/ /_/ / /  / /_/ (__  )
/_/ |_|\___/\___/\____/_/   \__,_/____/
    "#
    );
}
