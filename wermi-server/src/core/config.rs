use std::path::PathBuf;

use crate::auth::SessionConfig;
use crate::core::ServerError;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/wermi | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SESSION_SECRET | (开发环境随机生成) | 会话签名密钥, 至少 32 字符 |
/// | SESSION_TTL_MINUTES | 10080 | 会话有效期 (分钟) |
/// | SESSION_ISSUER | wermi-server | 令牌签发者 |
/// | SESSION_AUDIENCE | wermi-web | 令牌受众 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | {WORK_DIR}/logs | 日志目录 |
/// | LOGIN_RATE_LIMIT | 5 | 每 IP 每分钟登录次数 |
/// | REGISTER_RATE_LIMIT | 3 | 每 IP 每分钟注册次数 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/wermi HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 会话令牌配置
    pub session: SessionConfig,
    /// 日志级别
    pub log_level: String,
    /// 日志目录 (未设置时使用 work_dir/logs)
    pub log_dir: Option<String>,
    /// 登录限流 (次/分钟/IP)
    pub login_rate_limit: u32,
    /// 注册限流 (次/分钟/IP)
    pub register_rate_limit: u32,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值。会话密钥不合法时返回错误。
    pub fn from_env() -> Result<Self, ServerError> {
        let session = SessionConfig::from_env()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/wermi".into()),
            http_port: env_or("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            session,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            login_rate_limit: env_or("LOGIN_RATE_LIMIT", 5),
            register_rate_limit: env_or("REGISTER_RATE_LIMIT", 3),
        })
    }

    /// 测试配置: 固定密钥, 宽松限流
    pub fn for_tests(work_dir: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port: 0,
            environment: "test".into(),
            session: SessionConfig {
                secret: "wermi-test-session-secret-0123456789abcdef".into(),
                expiration_minutes: 60,
                issuer: "wermi-server".into(),
                audience: "wermi-web".into(),
            },
            log_level: "debug".into(),
            log_dir: None,
            login_rate_limit: 1000,
            register_rate_limit: 1000,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        match &self.log_dir {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(&self.work_dir).join("logs"),
        }
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_tests_config() {
        let config = Config::for_tests("/tmp/wermi");
        assert!(!config.is_production());
        assert!(config.session.secret.len() >= 32);
        assert_eq!(config.database_dir(), PathBuf::from("/tmp/wermi/database"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/wermi/logs"));
    }

    #[test]
    fn test_explicit_log_dir() {
        let config = Config {
            log_dir: Some("/var/log/wermi".into()),
            ..Config::for_tests("/tmp/wermi")
        };
        assert_eq!(config.log_dir(), PathBuf::from("/var/log/wermi"));
    }
}
