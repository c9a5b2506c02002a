//! 业务服务

pub mod onboarding;

pub use onboarding::OnboardingService;
