//! Profile Status Handler

use axum::Json;
use axum::extract::State;
use http::HeaderMap;
use http::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use crate::api::{AppError, AppResult};
use crate::auth::cookie::session_token;
use crate::auth::{ProfileStatus, SessionService, StatusError};
use crate::core::ServerState;
use crate::utils::ErrorCode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStatusResponse {
    pub is_complete: bool,
}

fn bearer_or_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(SessionService::extract_from_header)
        .or_else(|| session_token(headers))
}

/// GET /api/profile/status
pub async fn status(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<ProfileStatusResponse>> {
    let token = bearer_or_cookie(&headers).ok_or_else(AppError::not_authenticated)?;
    let session = state.session_service.verify(token)?;

    match state
        .onboarding()
        .is_profile_complete(&session.restaurant_id)
        .await
    {
        Ok(is_complete) => Ok(Json(ProfileStatusResponse { is_complete })),
        Err(StatusError::NotFound) => Err(AppError::new(ErrorCode::RestaurantNotFound)),
        Err(StatusError::Upstream(e)) => {
            tracing::error!(error = %e, "Profile status lookup failed");
            Err(AppError::upstream("Profile status unavailable"))
        }
    }
}
