//! Setup Wizard Routes (OWNER only)
//!
//! 每个写入接口都会重新计算并覆盖餐厅的 `is_profile_complete` 缓存。

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub use handler::{
    BasicInfoRequest, CategoryRequest, HoursRequest, ItemRequest, SettingsRequest, SetupOverview,
};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/setup", get(handler::overview))
        .route("/setup/basic-info", post(handler::update_basic_info))
        .route(
            "/setup/hours",
            get(handler::hours_page).post(handler::update_business_hours),
        )
        .route("/setup/menu", get(handler::menu_page))
        .route("/setup/menu/categories", post(handler::add_category))
        .route("/setup/menu/items", post(handler::add_item))
        .route("/setup/complete", post(handler::complete))
}
