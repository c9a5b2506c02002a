//! Wermi Server - 多租户餐厅管理系统
//!
//! # 架构概述
//!
//! - **请求网关** (`auth::gate`): 每个页面请求的登录 / 角色 / 开店引导判定
//! - **会话** (`auth::session`): 签名 Cookie 会话 (HS256 JWT)
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **引导状态** (`services::onboarding`): 餐厅资料完整度判定
//! - **HTTP API** (`api`): 表单动作与页面描述
//!
//! # 模块结构
//!
//! ```text
//! wermi-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 会话、网关、限流
//! ├── services/      # 引导状态服务
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 日志、校验、密码
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use auth::{SessionService, gate};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 .env 并初始化日志
pub fn setup_environment() -> Result<Config, core::ServerError> {
    let _ = dotenv::dotenv();

    let config = Config::from_env()?;
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir).map_err(|e| {
        core::ServerError::Internal(anyhow::anyhow!(
            "Failed to create log directory {}: {}",
            log_dir.display(),
            e
        ))
    })?;

    init_logger_with_file(Some(&config.log_level), log_dir.to_str());
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
 _      __                  _
| | /| / /__ ______ _  ___ (_)
| |/ |/ / -_) __/  ' \/ _ \/ /
|__/|__/\__/_/ /_/_/_/_//_/_/
    "#
    );
}
