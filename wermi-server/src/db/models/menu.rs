//! Menu Category / Menu Item Models

use serde::{Deserialize, Serialize};

/// Menu category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    pub category_id: String,
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct MenuCategoryCreate {
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Nutrition facts per serving
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionalInfo {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
}

/// Menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub item_id: String,
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Category name
    pub category: String,
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Minutes
    pub preparation_time: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    pub nutritional_info: Option<NutritionalInfo>,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct MenuItemCreate {
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub image: Option<String>,
    pub preparation_time: Option<u32>,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub nutritional_info: Option<NutritionalInfo>,
}

/// Category as returned by the setup API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategoryView {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: i64,
}

impl From<MenuCategory> for MenuCategoryView {
    fn from(c: MenuCategory) -> Self {
        Self {
            category_id: c.category_id,
            name: c.name,
            description: c.description,
            image: c.image,
            is_active: c.is_active,
            display_order: c.display_order,
            created_at: c.created_at,
        }
    }
}

/// Item as returned by the setup API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemView {
    pub item_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub image: Option<String>,
    pub is_available: bool,
    pub preparation_time: Option<u32>,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub nutritional_info: Option<NutritionalInfo>,
    pub created_at: i64,
}

impl From<MenuItem> for MenuItemView {
    fn from(i: MenuItem) -> Self {
        Self {
            item_id: i.item_id,
            name: i.name,
            description: i.description,
            price: i.price,
            category: i.category,
            image: i.image,
            is_available: i.is_available,
            preparation_time: i.preparation_time,
            ingredients: i.ingredients,
            allergens: i.allergens,
            nutritional_info: i.nutritional_info,
            created_at: i.created_at,
        }
    }
}

fn default_true() -> bool {
    true
}
