use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{RateLimiter, SessionService};
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::services::OnboardingService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | session_service | Arc<SessionService> | 会话令牌服务 |
/// | rate_limiter | RateLimiter | 登录 / 注册限流 |
///
/// 会话本身不在这里: 它只存在于签名 Cookie 中，由网关逐请求解出。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 会话令牌服务
    pub session_service: Arc<SessionService>,
    /// 限流器
    pub rate_limiter: RateLimiter,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let session_service = Arc::new(SessionService::with_config(config.session.clone()));
        Self {
            config,
            db,
            session_service,
            rate_limiter: RateLimiter::new(),
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/wermi.db) + schema
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("wermi.db");
        let db_service = DbService::open(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// 内存数据库状态 (测试用)
    pub async fn in_memory(config: Config) -> Result<Self, ServerError> {
        let db_service = DbService::memory().await?;
        Ok(Self::new(config, db_service.db))
    }

    /// 启动后台任务
    ///
    /// - 限流表清理 (每 5 分钟)
    pub async fn start_background_tasks(&self) {
        let rate_limiter = self.rate_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
            loop {
                interval.tick().await;
                rate_limiter.cleanup().await;
            }
        });
        tracing::debug!("Background tasks started");
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取会话服务
    pub fn get_session_service(&self) -> Arc<SessionService> {
        self.session_service.clone()
    }

    /// 引导状态服务
    pub fn onboarding(&self) -> OnboardingService {
        OnboardingService::new(self.get_db())
    }
}
