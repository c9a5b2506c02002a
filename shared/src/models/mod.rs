//! Data models
//!
//! Shared between wermi-server and frontend (via API).
//! Wire format is camelCase JSON throughout.

pub mod business_hours;
pub mod onboarding;
pub mod role;
pub mod session;

// Re-exports
pub use business_hours::*;
pub use onboarding::*;
pub use role::*;
pub use session::*;
