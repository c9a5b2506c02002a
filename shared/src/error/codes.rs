//! Unified error codes for the Wermi server
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Restaurant errors
//! - 6xxx: Menu errors
//! - 8xxx: Staff errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the web client can
/// switch on them without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Session token has expired
    TokenExpired = 1003,
    /// Session token is invalid
    TokenInvalid = 1004,
    /// Session has no role yet
    RoleSelectionRequired = 1008,
    /// Too many login/registration attempts
    TooManyRequests = 1009,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Owner role required
    OwnerRequired = 2003,

    // ==================== 3xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 3001,
    /// Email already registered
    EmailAlreadyExists = 3002,
    /// Business name already registered
    BusinessNameExists = 3003,
    /// Restaurant profile is not complete
    ProfileIncomplete = 3004,
    /// Business hours are malformed
    BusinessHoursInvalid = 3005,

    // ==================== 6xxx: Menu ====================
    /// Menu item name already exists
    MenuItemNameExists = 6002,
    /// Menu item has invalid price
    MenuItemInvalidPrice = 6003,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category name already exists
    CategoryNameExists = 6103,

    // ==================== 8xxx: Staff ====================
    /// Staff email already exists in this restaurant
    StaffEmailExists = 8002,
    /// Staff cannot hold this role
    StaffRoleInvalid = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Upstream store unreachable
    UpstreamUnavailable = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "Not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Session token has expired",
            ErrorCode::TokenInvalid => "Session token is invalid",
            ErrorCode::RoleSelectionRequired => "Please select a role first",
            ErrorCode::TooManyRequests => "Too many requests, try again later",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::OwnerRequired => "Restaurant owner role is required",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::EmailAlreadyExists => "Email already exists",
            ErrorCode::BusinessNameExists => "Business name already exists",
            ErrorCode::ProfileIncomplete => "Restaurant profile is not complete",
            ErrorCode::BusinessHoursInvalid => "Business hours are invalid",

            // Menu
            ErrorCode::MenuItemNameExists => "Menu item already exists",
            ErrorCode::MenuItemInvalidPrice => "Price must be positive",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryNameExists => "Category already exists",

            // Staff
            ErrorCode::StaffEmailExists => "Staff email already exists",
            ErrorCode::StaffRoleInvalid => "Staff members cannot hold the owner role",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::UpstreamUnavailable => "Service temporarily unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1008 => Ok(ErrorCode::RoleSelectionRequired),
            1009 => Ok(ErrorCode::TooManyRequests),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::OwnerRequired),

            // Restaurant
            3001 => Ok(ErrorCode::RestaurantNotFound),
            3002 => Ok(ErrorCode::EmailAlreadyExists),
            3003 => Ok(ErrorCode::BusinessNameExists),
            3004 => Ok(ErrorCode::ProfileIncomplete),
            3005 => Ok(ErrorCode::BusinessHoursInvalid),

            // Menu
            6002 => Ok(ErrorCode::MenuItemNameExists),
            6003 => Ok(ErrorCode::MenuItemInvalidPrice),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6103 => Ok(ErrorCode::CategoryNameExists),

            // Staff
            8002 => Ok(ErrorCode::StaffEmailExists),
            8003 => Ok(ErrorCode::StaffRoleInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::UpstreamUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);

        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::TooManyRequests.code(), 1009);

        assert_eq!(ErrorCode::OwnerRequired.code(), 2003);
        assert_eq!(ErrorCode::RestaurantNotFound.code(), 3001);
        assert_eq!(ErrorCode::CategoryNameExists.code(), 6103);
        assert_eq!(ErrorCode::StaffEmailExists.code(), 8002);
        assert_eq!(ErrorCode::UpstreamUnavailable.code(), 9003);
    }

    #[test]
    fn test_try_from_covers_every_code() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::RoleSelectionRequired,
            ErrorCode::TooManyRequests,
            ErrorCode::PermissionDenied,
            ErrorCode::OwnerRequired,
            ErrorCode::RestaurantNotFound,
            ErrorCode::EmailAlreadyExists,
            ErrorCode::BusinessNameExists,
            ErrorCode::ProfileIncomplete,
            ErrorCode::BusinessHoursInvalid,
            ErrorCode::MenuItemNameExists,
            ErrorCode::MenuItemInvalidPrice,
            ErrorCode::CategoryNotFound,
            ErrorCode::CategoryNameExists,
            ErrorCode::StaffEmailExists,
            ErrorCode::StaffRoleInvalid,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::UpstreamUnavailable,
        ];

        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4001), Err(InvalidErrorCode(4001)));
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&ErrorCode::NotFound).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&ErrorCode::InvalidCredentials).unwrap(),
            "1002"
        );
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::InvalidCredentials.message(),
            "Invalid credentials"
        );
        assert_eq!(
            ErrorCode::EmailAlreadyExists.message(),
            "Email already exists"
        );
        assert_eq!(ErrorCode::InternalError.message(), "Internal server error");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::RestaurantNotFound), "3001");
    }
}
