//! Staff Routes
//!
//! - POST /dashboard/staff: OWNER
//! - GET  /dashboard/staff: OWNER / MANAGER

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::StaffRequest;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/dashboard/staff",
        get(handler::list).post(handler::create),
    )
}
