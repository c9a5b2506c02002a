//! Public Pages
//!
//! Page descriptors for the screens a browser can open without a session.
//! `/auth/login` and `/auth/register` are registered by [`super::auth`]
//! together with their form handlers.

pub(crate) mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::PageView;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::home))
        .route("/auth/forgot-password", get(handler::forgot_password))
}
