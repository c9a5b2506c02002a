//! Input validation helpers
//!
//! Custom `validator` functions shared by the form payloads.

use std::borrow::Cow;

use shared::Role;
use validator::ValidationError;

pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Registration password policy: lowercase, uppercase, digit and one of
/// `@$!%*?&`; nothing else allowed
///
/// Passwords under 8 characters are left to the length rule.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < 8 {
        return Ok(());
    }

    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if allowed && lower && upper && digit && special {
        Ok(())
    } else {
        Err(error(
            "password_strength",
            "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character.",
        ))
    }
}

/// Staff accounts may hold any role but OWNER
pub fn validate_staff_role(role: &Role) -> Result<(), ValidationError> {
    if role.is_staff() {
        Ok(())
    } else {
        Err(error("staff_role", "Staff members cannot be given the OWNER role"))
    }
}

/// Every entry of a tag list must be non-blank
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.iter().any(|t| t.trim().is_empty()) {
        Err(error("blank_tag", "Entries must not be empty"))
    } else {
        Ok(())
    }
}
