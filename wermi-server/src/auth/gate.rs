//! 请求网关 - 页面请求的登录 / 角色 / 开店引导判定
//!
//! [`evaluate`] 是纯判定逻辑: 输入路径、会话和资料完整度查询，输出网关状态和
//! 放行 / 重定向决定。它从不修改会话；axum 层的粘合代码在
//! [`crate::auth::middleware`]。
//!
//! | 条件 | 结果 |
//! |------|------|
//! | 公开页 (`/`，未登录时的 `/auth/login` 等) | 放行 |
//! | 未登录，非 `/auth` 路径 | → `/auth/login` |
//! | 未登录，`/auth` 路径 | 放行 |
//! | 已登录，`/auth` 路径 (非 `/auth/role`)，店主 | → `/dashboard` 或 `/setup` |
//! | 已登录，`/auth` 路径 (非 `/auth/role`)，员工 | → `/dashboard` |
//! | 已登录，`/auth` 路径 (非 `/auth/role`)，无角色 | → `/auth/role` |
//! | 其他已登录请求 | 放行并转发身份 |

use shared::{Role, Session};
use thiserror::Error;

pub const LOGIN_PATH: &str = "/auth/login";
pub const ROLE_PATH: &str = "/auth/role";
pub const SETUP_PATH: &str = "/setup";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGOUT_PATH: &str = "/logout";

/// Pages reachable without a session
pub const PUBLIC_PATHS: [&str; 4] = ["/", "/auth/login", "/auth/register", "/auth/forgot-password"];

/// Identity headers forwarded to downstream handlers
pub const HEADER_USER_ID: &str = "x-user-id";
pub const HEADER_RESTAURANT_ID: &str = "x-restaurant-id";
pub const HEADER_STAFF_ID: &str = "x-staff-id";
pub const HEADER_USER_ROLE: &str = "x-user-role";

pub const IDENTITY_HEADERS: [&str; 4] = [
    HEADER_USER_ID,
    HEADER_RESTAURANT_ID,
    HEADER_STAFF_ID,
    HEADER_USER_ROLE,
];

/// Where a request stands relative to authentication and onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Public,
    Unauthenticated,
    AuthenticatedNoRole,
    AuthenticatedStaff,
    AuthenticatedOwnerIncomplete,
    AuthenticatedOwnerComplete,
    /// Owner on a path whose decision does not depend on completeness;
    /// the lookup is skipped
    AuthenticatedOwner,
}

/// Gate decision for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through; `forward` is the identity to attach
    Allow { forward: Option<Session> },
    /// Redirect; `clear_session` drops an unusable cookie
    Redirect {
        location: &'static str,
        clear_session: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub state: GateState,
    pub decision: GateDecision,
}

impl GateOutcome {
    fn allow(state: GateState, forward: Option<Session>) -> Self {
        Self {
            state,
            decision: GateDecision::Allow { forward },
        }
    }

    fn redirect(state: GateState, location: &'static str) -> Self {
        Self {
            state,
            decision: GateDecision::Redirect {
                location,
                clear_session: false,
            },
        }
    }

    /// Redirect target, if any
    pub fn location(&self) -> Option<&'static str> {
        match self.decision {
            GateDecision::Redirect { location, .. } => Some(location),
            GateDecision::Allow { .. } => None,
        }
    }
}

/// Profile completeness lookup failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusError {
    /// No restaurant for this id
    #[error("restaurant not found")]
    NotFound,
    /// Storage unreachable or query failed
    #[error("profile status unavailable: {0}")]
    Upstream(String),
}

/// Profile completeness lookup used by the gate
#[allow(async_fn_in_trait)]
pub trait ProfileStatus {
    async fn is_profile_complete(&self, restaurant_id: &str) -> Result<bool, StatusError>;
}

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// `/auth` or anything under `/auth/`
pub fn is_auth_path(path: &str) -> bool {
    path == "/auth" || path.starts_with("/auth/")
}

/// Whether the page gate applies to this path
///
/// `/api/*` authenticates by bearer token on its own; logout must work for
/// any session, including none.
pub fn is_gated(path: &str) -> bool {
    !(path == "/api" || path.starts_with("/api/") || path == LOGOUT_PATH)
}

/// Decide what happens to a page request
pub async fn evaluate(
    path: &str,
    session: &Session,
    status: &impl ProfileStatus,
) -> GateOutcome {
    let logged_in = session.is_authenticated();
    let auth_path = is_auth_path(path);

    // 已登录用户访问登录 / 注册页时仍需走第 3 条规则
    if is_public_path(path) && !(logged_in && auth_path) {
        return GateOutcome::allow(GateState::Public, None);
    }

    if !logged_in {
        if auth_path {
            return GateOutcome::allow(GateState::Unauthenticated, None);
        }
        return GateOutcome::redirect(GateState::Unauthenticated, LOGIN_PATH);
    }

    if auth_path && path != ROLE_PATH {
        return match session.role {
            Some(Role::Owner) => owner_landing(session, status).await,
            Some(_) => GateOutcome::redirect(GateState::AuthenticatedStaff, DASHBOARD_PATH),
            None => GateOutcome::redirect(GateState::AuthenticatedNoRole, ROLE_PATH),
        };
    }

    let state = match session.role {
        Some(Role::Owner) => GateState::AuthenticatedOwner,
        Some(_) => GateState::AuthenticatedStaff,
        None => GateState::AuthenticatedNoRole,
    };
    GateOutcome::allow(state, Some(session.clone()))
}

async fn owner_landing(session: &Session, status: &impl ProfileStatus) -> GateOutcome {
    match status.is_profile_complete(&session.restaurant_id).await {
        Ok(true) => GateOutcome::redirect(GateState::AuthenticatedOwnerComplete, DASHBOARD_PATH),
        Ok(false) => GateOutcome::redirect(GateState::AuthenticatedOwnerIncomplete, SETUP_PATH),
        Err(StatusError::NotFound) => GateOutcome {
            state: GateState::Unauthenticated,
            decision: GateDecision::Redirect {
                location: LOGIN_PATH,
                clear_session: true,
            },
        },
        // fail closed
        Err(StatusError::Upstream(e)) => {
            tracing::warn!(
                restaurant_id = %session.restaurant_id,
                error = %e,
                "Profile status lookup failed, routing owner to setup"
            );
            GateOutcome::redirect(GateState::AuthenticatedOwnerIncomplete, SETUP_PATH)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Fixed {
        result: Result<bool, StatusError>,
        calls: Cell<u32>,
    }

    impl Fixed {
        fn new(result: Result<bool, StatusError>) -> Self {
            Self {
                result,
                calls: Cell::new(0),
            }
        }
    }

    impl ProfileStatus for Fixed {
        async fn is_profile_complete(&self, _restaurant_id: &str) -> Result<bool, StatusError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    fn complete() -> Fixed {
        Fixed::new(Ok(true))
    }

    #[tokio::test]
    async fn test_public_paths_allowed_without_session() {
        for path in PUBLIC_PATHS {
            let outcome = evaluate(path, &Session::anonymous(), &complete()).await;
            assert_eq!(outcome.state, GateState::Public, "{path}");
            assert_eq!(outcome.location(), None);
        }
    }

    #[tokio::test]
    async fn test_home_is_public_even_when_logged_in() {
        let outcome = evaluate("/", &Session::owner("r1"), &complete()).await;
        assert_eq!(outcome.state, GateState::Public);
        assert_eq!(outcome.decision, GateDecision::Allow { forward: None });
    }

    #[tokio::test]
    async fn test_logged_out_protected_path_redirects_to_login() {
        for path in ["/dashboard", "/setup", "/setup/hours", "/dashboard/staff", "/anything"] {
            let outcome = evaluate(path, &Session::anonymous(), &complete()).await;
            assert_eq!(outcome.state, GateState::Unauthenticated);
            assert_eq!(outcome.location(), Some(LOGIN_PATH), "{path}");
        }
    }

    #[tokio::test]
    async fn test_logged_out_auth_paths_allowed() {
        for path in ["/auth", "/auth/role", "/auth/reset"] {
            let outcome = evaluate(path, &Session::anonymous(), &complete()).await;
            assert_eq!(outcome.decision, GateDecision::Allow { forward: None }, "{path}");
        }
    }

    #[tokio::test]
    async fn test_auth_prefix_is_segment_based() {
        let outcome = evaluate("/authors", &Session::anonymous(), &complete()).await;
        assert_eq!(outcome.location(), Some(LOGIN_PATH));
    }

    #[tokio::test]
    async fn test_waiter_on_login_goes_to_dashboard() {
        let status = complete();
        let session = Session::staff("r1", "s1", Role::Waiter);
        let outcome = evaluate("/auth/login", &session, &status).await;
        assert_eq!(outcome.state, GateState::AuthenticatedStaff);
        assert_eq!(outcome.location(), Some(DASHBOARD_PATH));
        assert_eq!(status.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_owner_on_auth_path_routed_by_completeness() {
        let outcome = evaluate("/auth/register", &Session::owner("r1"), &complete()).await;
        assert_eq!(outcome.state, GateState::AuthenticatedOwnerComplete);
        assert_eq!(outcome.location(), Some(DASHBOARD_PATH));

        let incomplete = Fixed::new(Ok(false));
        let outcome = evaluate("/auth/login", &Session::owner("r1"), &incomplete).await;
        assert_eq!(outcome.state, GateState::AuthenticatedOwnerIncomplete);
        assert_eq!(outcome.location(), Some(SETUP_PATH));
    }

    #[tokio::test]
    async fn test_roleless_session_sent_to_role_selection() {
        let session = Session::owner("r1").without_role();
        let outcome = evaluate("/auth/login", &session, &complete()).await;
        assert_eq!(outcome.state, GateState::AuthenticatedNoRole);
        assert_eq!(outcome.location(), Some(ROLE_PATH));
    }

    #[tokio::test]
    async fn test_role_page_reachable_when_logged_in() {
        let session = Session::owner("r1").without_role();
        let outcome = evaluate(ROLE_PATH, &session, &complete()).await;
        assert!(matches!(outcome.decision, GateDecision::Allow { .. }));
    }

    #[tokio::test]
    async fn test_upstream_failure_fails_closed() {
        let failing = Fixed::new(Err(StatusError::Upstream("db down".into())));
        let outcome = evaluate("/auth/login", &Session::owner("r1"), &failing).await;
        assert_eq!(outcome.location(), Some(SETUP_PATH));
    }

    #[tokio::test]
    async fn test_missing_restaurant_treated_as_logged_out() {
        let missing = Fixed::new(Err(StatusError::NotFound));
        let outcome = evaluate("/auth/login", &Session::owner("gone"), &missing).await;
        assert_eq!(outcome.state, GateState::Unauthenticated);
        assert_eq!(
            outcome.decision,
            GateDecision::Redirect {
                location: LOGIN_PATH,
                clear_session: true
            }
        );
    }

    #[tokio::test]
    async fn test_allowed_request_forwards_identity() {
        let status = complete();
        let session = Session::staff("r1", "s1", Role::Chef);
        let outcome = evaluate("/dashboard/menu", &session, &status).await;
        assert_eq!(outcome.state, GateState::AuthenticatedStaff);
        assert_eq!(
            outcome.decision,
            GateDecision::Allow {
                forward: Some(session)
            }
        );
        assert_eq!(status.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_owner_on_protected_path_skips_lookup() {
        let status = complete();
        let outcome = evaluate("/setup/hours", &Session::owner("r1"), &status).await;
        assert_eq!(outcome.state, GateState::AuthenticatedOwner);
        assert!(matches!(outcome.decision, GateDecision::Allow { .. }));
        assert_eq!(status.calls.get(), 0);
    }

    #[test]
    fn test_gated_paths() {
        assert!(is_gated("/dashboard"));
        assert!(is_gated("/auth/login"));
        assert!(is_gated("/apiary"));
        assert!(!is_gated("/api/profile/status"));
        assert!(!is_gated(LOGOUT_PATH));
    }

    #[tokio::test]
    async fn test_logged_in_flag_without_ids_is_logged_out() {
        let session = Session {
            is_logged_in: true,
            ..Session::default()
        };
        let outcome = evaluate("/dashboard", &session, &complete()).await;
        assert_eq!(outcome.location(), Some(LOGIN_PATH));
    }
}
