//! Shared types for Wermi
//!
//! Domain types used by the server and any client talking to it:
//! the unified error system, roles, sessions, business hours and the
//! onboarding completeness predicate.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    BusinessHours, OnboardingSnapshot, Role, Session, SetupProgress, SetupStep,
};
