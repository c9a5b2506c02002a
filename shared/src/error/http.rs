//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::RestaurantNotFound
            | Self::CategoryNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::EmailAlreadyExists
            | Self::BusinessNameExists
            | Self::MenuItemNameExists
            | Self::CategoryNameExists
            | Self::StaffEmailExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::OwnerRequired
            | Self::RoleSelectionRequired => StatusCode::FORBIDDEN,

            // 422 Unprocessable
            Self::ProfileIncomplete => StatusCode::UNPROCESSABLE_ENTITY,

            // 429 Too Many Requests
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,

            // 503 Service Unavailable (transient, client can retry)
            Self::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
