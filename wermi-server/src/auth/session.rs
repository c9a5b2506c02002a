//! 会话令牌服务
//!
//! 会话只存在于客户端 Cookie 中: 服务端签发 HS256 JWT，逐请求验证并还原
//! 为 [`Session`]。服务端不保存任何会话表。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::{Role, Session};
use thiserror::Error;

/// 默认会话有效期: 7 天
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 7 * 24 * 60;

/// 会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 签名密钥 (至少 32 字节)
    pub secret: String,
    /// 会话过期时间 (分钟)
    pub expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl SessionConfig {
    /// 从环境变量加载
    pub fn from_env() -> Result<Self, SessionError> {
        Ok(Self {
            secret: load_session_secret()?,
            expiration_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SESSION_TTL_MINUTES),
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "wermi-server".to_string()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "wermi-web".to_string()),
        })
    }

    /// Cookie Max-Age (秒)
    pub fn max_age_seconds(&self) -> i64 {
        self.expiration_minutes * 60
    }
}

/// 令牌中的会话 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 用户 ID (Subject): 店主为餐厅 ID，员工为员工 ID
    pub sub: String,
    pub restaurant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

impl SessionClaims {
    /// 还原会话; 缺少标识的令牌视为无效
    pub fn into_session(self) -> Result<Session, SessionError> {
        if self.sub.is_empty() || self.restaurant_id.is_empty() {
            return Err(SessionError::InvalidToken(
                "session is missing user or restaurant id".to_string(),
            ));
        }
        Ok(Session {
            user_id: self.sub,
            restaurant_id: self.restaurant_id,
            role: self.role,
            staff_id: self.staff_id,
            is_logged_in: true,
        })
    }
}

/// 会话错误
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("未登录的会话不能签发令牌")]
    NotLoggedIn,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 生成可打印的安全密钥 (用于开发环境)
pub fn generate_secure_printable_secret() -> Result<String, SessionError> {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes)
        .map_err(|_| SessionError::ConfigError("Failed to generate secure random key".into()))?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED[(*b as usize) % ALLOWED.len()] as char)
        .collect())
}

/// 从环境变量加载会话密钥
fn load_session_secret() -> Result<String, SessionError> {
    match std::env::var("SESSION_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(SessionError::ConfigError(
                    "SESSION_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!(
                    "SESSION_SECRET not set! Generating temporary key, sessions will not survive a restart."
                );
                generate_secure_printable_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                Err(SessionError::ConfigError(
                    "SESSION_SECRET environment variable must be set in production!".to_string(),
                ))
            }
        }
    }
}

/// 会话令牌服务
#[derive(Clone)]
pub struct SessionService {
    pub config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionService {
    pub fn with_config(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为会话签发令牌
    pub fn issue(&self, session: &Session) -> Result<String, SessionError> {
        if !session.is_authenticated() {
            return Err(SessionError::NotLoggedIn);
        }

        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = SessionClaims {
            sub: session.user_id.clone(),
            restaurant_id: session.restaurant_id.clone(),
            role: session.role,
            staff_id: session.staff_id.clone(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SessionError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => SessionError::ExpiredToken,
                    ErrorKind::InvalidSignature => SessionError::InvalidSignature,
                    _ => SessionError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// 令牌 -> 会话
    pub fn verify(&self, token: &str) -> Result<Session, SessionError> {
        self.validate_token(token)?.into_session()
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("expiration_minutes", &self.config.expiration_minutes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig {
            secret: "unit-test-secret-that-is-long-enough-0123".to_string(),
            expiration_minutes: 60,
            issuer: "wermi-server".to_string(),
            audience: "wermi-web".to_string(),
        }
    }

    #[test]
    fn test_owner_session_round_trip() {
        let service = SessionService::with_config(config());
        let token = service.issue(&Session::owner("r1")).unwrap();
        let session = service.verify(&token).unwrap();
        assert_eq!(session, Session::owner("r1"));
    }

    #[test]
    fn test_roleless_session_round_trip() {
        let service = SessionService::with_config(config());
        let original = Session::staff("r1", "s1", Role::Cashier).without_role();
        let token = service.issue(&original).unwrap();
        let session = service.verify(&token).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.role, None);
        assert_eq!(session.staff_id, None);
    }

    #[test]
    fn test_anonymous_session_cannot_be_issued() {
        let service = SessionService::with_config(config());
        assert!(matches!(
            service.issue(&Session::anonymous()),
            Err(SessionError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let service = SessionService::with_config(config());
        let other = SessionService::with_config(SessionConfig {
            secret: "another-secret-that-is-also-long-enough-99".to_string(),
            ..config()
        });
        let token = other.issue(&Session::owner("r1")).unwrap();
        assert!(matches!(
            service.verify(&token),
            Err(SessionError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = SessionService::with_config(SessionConfig {
            expiration_minutes: -10,
            ..config()
        });
        let token = service.issue(&Session::owner("r1")).unwrap();
        assert!(matches!(
            service.verify(&token),
            Err(SessionError::ExpiredToken)
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let service = SessionService::with_config(config());
        let other = SessionService::with_config(SessionConfig {
            audience: "someone-else".to_string(),
            ..config()
        });
        let token = other.issue(&Session::owner("r1")).unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = SessionService::with_config(config());
        assert!(service.verify("not-a-token").is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(SessionService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(SessionService::extract_from_header("Bearer "), None);
        assert_eq!(SessionService::extract_from_header("Basic abc"), None);
    }

    #[test]
    fn test_printable_secret() {
        let a = generate_secure_printable_secret().unwrap();
        let b = generate_secure_printable_secret().unwrap();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
