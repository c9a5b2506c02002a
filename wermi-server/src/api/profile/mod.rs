//! Profile Status API
//!
//! `/api/*` 不经过页面网关，自行校验 Bearer 令牌 (Cookie 作为后备)。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::ProfileStatusResponse;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/profile/status", get(handler::status))
}
