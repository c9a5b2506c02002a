//! 统一错误处理
//!
//! 错误类型统一来自 `shared::error`，这里只负责各层错误到 [`AppError`] 的转换。
//!
//! ```ignore
//! // 仓储层错误
//! let restaurant = repo.find_by_id(id).await.map_err(repo_error)?;
//!
//! // 表单校验
//! payload.validate().map_err(validation_error)?;
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::auth::SessionError;
use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        repo_error(err)
    }
}

/// 仓储层错误 -> AppError (数据库细节只进日志)
pub fn repo_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
        RepoError::Duplicate(msg) => AppError::conflict(msg),
        RepoError::Validation(msg) => AppError::validation(msg),
        RepoError::Database(msg) => {
            tracing::error!(error = %msg, "Database operation failed");
            AppError::database("Database operation failed")
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::ExpiredToken => AppError::token_expired(),
            SessionError::NotLoggedIn => AppError::not_authenticated(),
            SessionError::GenerationFailed(msg) | SessionError::ConfigError(msg) => {
                tracing::error!(error = %msg, "Session token error");
                AppError::internal("Failed to establish session")
            }
            other => AppError::invalid_token(other.to_string()),
        }
    }
}

/// 表单校验错误 -> AppError
///
/// 取字段名排序后的第一个字段的第一条错误，消息原样返回给客户端，字段名
/// 以 camelCase 放入 `details.field`。
pub fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let mut fields = Vec::new();
    collect_errors("", &errors, &mut fields);
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let Some((field, err)) = fields.into_iter().next() else {
        return AppError::validation("Invalid input");
    };

    let message = err
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("Invalid {field}"));

    AppError::field(field, message)
}

/// 嵌套结构的错误以 `settings.taxRate` 形式展开
fn collect_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<(String, validator::ValidationError)>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let name = camel_case(&field.to_string());
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}.{name}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                if let Some(first) = errs.first() {
                    out.push((path, first.clone()));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_errors(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
