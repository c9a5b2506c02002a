//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - 日志、校验、密码哈希

pub mod error;
pub mod logger;
pub mod password;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use error::{repo_error, validation_error};
