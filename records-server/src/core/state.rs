use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::{AppError, AppResult};

/// 服务器状态 - 所有请求共享
///
/// 使用 Clone 浅拷贝 (SqlitePool 内部为 Arc)，请求之间除连接池外
/// 没有共享的可变状态。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | 记录存储连接池 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 记录存储 (SQLite)
    pub pool: SqlitePool,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 测试中配合 [`DbService::in_memory`] 使用
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (连接 + 迁移)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_service = DbService::new(&config.database_url()).await?;

        Ok(Self::new(config.clone(), db_service.pool))
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
