//! Dashboard Handlers

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use http::header::SET_COOKIE;
use serde::Serialize;
use shared::Role;

use crate::api::pages::PageView;
use crate::api::{ApiResponse, AppError, AppResult};
use crate::auth::cookie::clear_session_cookie;
use crate::auth::gate::{LOGIN_PATH, ROLE_PATH, SETUP_PATH};
use crate::auth::{CurrentSession, ProfileStatus, RoleSession, StatusError};
use crate::core::ServerState;
use crate::db::models::RestaurantAccount;
use crate::db::repository::RestaurantRepository;
use crate::utils::ErrorCode;

/// Sidebar entry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavLink {
    pub title: &'static str,
    pub href: &'static str,
}

pub const NAVIGATION: [NavLink; 6] = [
    NavLink { title: "Dashboard", href: "/dashboard" },
    NavLink { title: "Menu", href: "/dashboard/menu" },
    NavLink { title: "Orders", href: "/dashboard/orders" },
    NavLink { title: "Inventory", href: "/dashboard/inventory" },
    NavLink { title: "Staff", href: "/dashboard/staff" },
    NavLink { title: "Analytics", href: "/dashboard/analytics" },
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardShell {
    pub page: PageView,
    pub business_name: String,
    pub role: Role,
    pub user_id: String,
    pub navigation: Vec<NavLink>,
}

/// GET /dashboard
///
/// 网关对 /dashboard 只检查登录；OWNER 的资料完整度在这里再确认一次。
pub async fn shell(
    State(state): State<ServerState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Response> {
    let Some(role) = session.role else {
        return Ok(Redirect::temporary(ROLE_PATH).into_response());
    };

    if role == Role::Owner {
        match state
            .onboarding()
            .is_profile_complete(&session.restaurant_id)
            .await
        {
            Ok(true) => {}
            Ok(false) => return Ok(Redirect::temporary(SETUP_PATH).into_response()),
            Err(StatusError::NotFound) => return Ok(signed_out(&state)),
            Err(StatusError::Upstream(e)) => {
                tracing::warn!(error = %e, "Profile status unavailable, sending owner to setup");
                return Ok(Redirect::temporary(SETUP_PATH).into_response());
            }
        }
    }

    let Some(restaurant) = RestaurantRepository::new(state.get_db())
        .find_by_id(&session.restaurant_id)
        .await?
    else {
        return Ok(signed_out(&state));
    };

    Ok(ApiResponse::success(DashboardShell {
        page: PageView::new("dashboard", "Dashboard"),
        business_name: restaurant.business_name,
        role,
        user_id: session.user_id,
        navigation: NAVIGATION.to_vec(),
    })
    .into_response())
}

/// 餐厅已不存在：按未登录处理，清 Cookie 回登录页
fn signed_out(state: &ServerState) -> Response {
    tracing::warn!("Session points at a missing restaurant, signing out");
    let cookie = clear_session_cookie(state.config.is_production());
    ([(SET_COOKIE, cookie)], Redirect::temporary(LOGIN_PATH)).into_response()
}

/// GET /dashboard/restaurant
pub async fn restaurant(
    State(state): State<ServerState>,
    RoleSession(session, _): RoleSession,
) -> AppResult<ApiResponse<RestaurantAccount>> {
    let restaurant = RestaurantRepository::new(state.get_db())
        .find_by_id(&session.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    Ok(ApiResponse::success(restaurant.into()))
}
