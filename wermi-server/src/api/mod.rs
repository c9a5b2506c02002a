//! API 路由模块
//!
//! # 结构
//!
//! - [`pages`] - 公开页面 (首页、登录、注册、找回密码)
//! - [`auth`] - 注册、登录、角色选择、登出
//! - [`setup`] - 开店引导向导
//! - [`dashboard`] - 仪表盘外壳与账户信息
//! - [`staff`] - 员工管理
//! - [`profile`] - `/api/profile/status` 完整度查询
//!
//! 所有路由都挂在页面网关 [`page_gate`] 之后；网关负责重定向，
//! 处理函数只通过提取器 ([`CurrentSession`](crate::auth::CurrentSession) 等)
//! 读取网关确认过的会话。

pub mod auth;
pub mod dashboard;
pub mod pages;
pub mod profile;
pub mod setup;
pub mod staff;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::page_gate;
use crate::core::ServerState;

pub use crate::utils::{ApiResponse, AppError, AppResult};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Where the browser should go next
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectData {
    pub redirect_url: String,
}

impl RedirectData {
    pub fn to(url: impl Into<String>) -> Self {
        Self {
            redirect_url: url.into(),
        }
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(pages::router())
        .merge(auth::router(state))
        .merge(setup::router())
        .merge(dashboard::router())
        .merge(staff::router())
        .merge(profile::router())
}

/// Build the fully configured application
///
/// Used by the HTTP server and by the integration tests (oneshot).
pub fn build_app(state: ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router(&state)
        // 页面网关: 在所有路由之前执行，注入 CurrentSession
        .layer(axum_middleware::from_fn_with_state(state.clone(), page_gate))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), XRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .with_state(state)
}
