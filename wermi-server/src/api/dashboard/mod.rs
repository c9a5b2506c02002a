//! Dashboard Routes

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::{DashboardShell, NAVIGATION, NavLink};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/dashboard", get(handler::shell))
        .route("/dashboard/restaurant", get(handler::restaurant))
}
