//! 认证授权模块
//!
//! - [`SessionService`] - 会话令牌服务
//! - [`gate`] - 页面请求网关判定
//! - [`page_gate`] - 网关中间件
//! - [`CurrentSession`] / [`OwnerSession`] - 会话提取器
//! - [`RateLimiter`] - 登录 / 注册限流

pub mod cookie;
pub mod extractor;
pub mod gate;
pub mod middleware;
pub mod rate_limit;
pub mod session;

pub use extractor::{CurrentSession, OwnerSession, RoleSession};
pub use gate::{GateDecision, GateOutcome, GateState, ProfileStatus, StatusError};
pub use middleware::page_gate;
pub use rate_limit::{RateLimiter, login_rate_limit, register_rate_limit};
pub use session::{SessionClaims, SessionConfig, SessionError, SessionService};
