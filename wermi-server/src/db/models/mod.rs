//! Database Models
//!
//! Each document stores its own string id (`restaurant_id`, `staff_id`, ...)
//! next to the SurrealDB record id, so handlers never format `RecordId`s.

pub mod menu;
pub mod restaurant;
pub mod staff;

pub use menu::{
    MenuCategory, MenuCategoryCreate, MenuCategoryView, MenuItem, MenuItemCreate, MenuItemView,
    NutritionalInfo,
};
pub use restaurant::{
    BasicInfoUpdate, Restaurant, RestaurantAccount, RestaurantCreate, RestaurantSettings,
};
pub use staff::{Staff, StaffCreate, StaffView};
