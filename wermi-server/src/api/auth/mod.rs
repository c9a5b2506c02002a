//! Authentication Routes
//!
//! - `/auth/register`, `/auth/login`: 公开页面 + 表单提交 (POST 限流)
//! - `/auth/role`: 登录后选择角色
//! - `/dashboard/release-role`: 放弃当前角色，回到角色选择
//! - `/logout`: 不经过网关，可重复调用

mod handler;

use axum::middleware::from_fn_with_state;
use axum::{Router, routing::get, routing::post};

use super::pages::handler as pages;
use crate::auth::{login_rate_limit, register_rate_limit};
use crate::core::ServerState;

pub use handler::{LoginRequest, RegisterData, RegisterRequest, SelectRoleRequest};

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route(
            "/auth/register",
            get(pages::register)
                .post(handler::register)
                .layer(from_fn_with_state(state.clone(), register_rate_limit)),
        )
        .route(
            "/auth/login",
            get(pages::login)
                .post(handler::login)
                .layer(from_fn_with_state(state.clone(), login_rate_limit)),
        )
        .route("/auth/role", get(pages::role).post(handler::select_role))
        .route("/dashboard/release-role", post(handler::release_role))
        .route("/logout", post(handler::logout))
}
