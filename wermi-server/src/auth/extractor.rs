//! Session Extractors
//!
//! Handlers receive the gate-verified session explicitly. The gate stores
//! [`CurrentSession`] in the request extensions; these extractors only read
//! it back.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::{ErrorCode, Role, Session};

use crate::AppError;
use crate::security_log;

/// The authenticated session of the current request
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl<S: Send + Sync> FromRequestParts<S> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentSession>() {
            Some(session) if session.0.is_authenticated() => Ok(session.clone()),
            _ => Err(AppError::not_authenticated()),
        }
    }
}

/// A session holding the OWNER role
#[derive(Debug, Clone)]
pub struct OwnerSession(pub Session);

impl<S: Send + Sync> FromRequestParts<S> for OwnerSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        if session.role != Some(Role::Owner) {
            security_log!(
                "WARN",
                "owner_required",
                user_id = session.user_id.clone(),
                path = parts.uri.path().to_string()
            );
            return Err(AppError::owner_required());
        }
        Ok(OwnerSession(session))
    }
}

/// A session holding any role
#[derive(Debug, Clone)]
pub struct RoleSession(pub Session, pub Role);

impl<S: Send + Sync> FromRequestParts<S> for RoleSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        match session.role {
            Some(role) => Ok(RoleSession(session, role)),
            None => Err(AppError::new(ErrorCode::RoleSelectionRequired)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts_with(session: Option<Session>) -> Parts {
        let mut request = http::Request::builder()
            .uri("/setup/hours")
            .body(())
            .unwrap();
        if let Some(session) = session {
            request.extensions_mut().insert(CurrentSession(session));
        }
        request.into_parts().0
    }

    #[tokio::test]
    async fn test_missing_session_rejected() {
        let mut parts = parts_with(None);
        let err = CurrentSession::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_owner_session_extracted() {
        let mut parts = parts_with(Some(Session::owner("r1")));
        let OwnerSession(session) = OwnerSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(session.restaurant_id, "r1");
    }

    #[tokio::test]
    async fn test_staff_rejected_as_owner() {
        let mut parts = parts_with(Some(Session::staff("r1", "s1", Role::Manager)));
        let err = OwnerSession::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OwnerRequired);
    }

    #[tokio::test]
    async fn test_roleless_session_needs_role_selection() {
        let mut parts = parts_with(Some(Session::owner("r1").without_role()));
        let err = RoleSession::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RoleSelectionRequired);
    }
}
