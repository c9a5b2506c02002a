//! Setup Wizard Handlers

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use shared::{BusinessHours, SetupProgress};
use validator::Validate;

use crate::api::pages::PageView;
use crate::api::{ApiResponse, AppError, AppResult, RedirectData};
use crate::auth::OwnerSession;
use crate::auth::gate::DASHBOARD_PATH;
use crate::core::ServerState;
use crate::db::models::{
    BasicInfoUpdate, MenuCategoryCreate, MenuCategoryView, MenuItemCreate, MenuItemView,
    NutritionalInfo, Restaurant, RestaurantSettings,
};
use crate::db::repository::{
    MenuCategoryRepository, MenuItemRepository, RepoError, RestaurantRepository,
};
use crate::services::OnboardingService;
use crate::utils::validation::validate_tags;
use crate::utils::{ErrorCode, repo_error, validation_error};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRequest {
    #[validate(length(min = 1, message = "Currency is required"))]
    pub currency: String,
    #[validate(length(min = 1, message = "Timezone is required"))]
    pub timezone: String,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "Tax rate must be between 0 and 100"))]
    pub tax_rate: f64,
    #[serde(default)]
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Service charge must be between 0 and 100"
    ))]
    pub service_charge: f64,
    #[serde(default = "default_true")]
    pub allow_reservations: bool,
    #[serde(default)]
    pub require_payment: bool,
    #[serde(default = "default_true")]
    pub auto_accept_orders: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoRequest {
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[validate(
        length(min = 1, message = "Please select at least one cuisine"),
        custom(function = "validate_tags")
    )]
    pub cuisine: Vec<String>,
    #[validate(nested)]
    pub settings: SettingsRequest,
}

impl BasicInfoRequest {
    fn normalize(&mut self) {
        self.cuisine = self.cuisine.iter().map(|c| c.trim().to_string()).collect();
        self.settings.currency = self.settings.currency.trim().to_string();
        self.settings.timezone = self.settings.timezone.trim().to_string();
    }

    fn into_update(self) -> BasicInfoUpdate {
        BasicInfoUpdate {
            logo: self.logo,
            cover_image: self.cover_image,
            cuisine: self.cuisine,
            settings: RestaurantSettings {
                currency: Some(self.settings.currency),
                timezone: Some(self.settings.timezone),
                tax_rate: self.settings.tax_rate,
                service_charge: self.settings.service_charge,
                allow_reservations: self.settings.allow_reservations,
                require_payment: self.settings.require_payment,
                auto_accept_orders: self.settings.auto_accept_orders,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursRequest {
    pub business_hours: Vec<BusinessHours>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 2, message = "Category name must be at least 2 characters."))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    #[validate(length(min = 2, message = "Item name must be at least 2 characters."))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a positive number."))]
    pub price: f64,
    #[validate(length(min = 1, message = "Please select a category."))]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub preparation_time: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub nutritional_info: Option<NutritionalInfo>,
}

/// GET /setup response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupOverview {
    pub page: PageView,
    pub progress: SetupProgress,
    pub basic_info: Value,
}

fn basic_info_view(restaurant: &Restaurant) -> Value {
    let settings = &restaurant.settings;
    json!({
        "businessName": restaurant.business_name,
        "logo": restaurant.logo,
        "coverImage": restaurant.cover_image,
        "cuisine": restaurant.cuisine,
        "settings": {
            "currency": settings.currency,
            "timezone": settings.timezone,
            "taxRate": settings.tax_rate,
            "serviceCharge": settings.service_charge,
            "allowReservations": settings.allow_reservations,
            "requirePayment": settings.require_payment,
            "autoAcceptOrders": settings.auto_accept_orders,
        }
    })
}

async fn load_restaurant(state: &ServerState, restaurant_id: &str) -> AppResult<Restaurant> {
    RestaurantRepository::new(state.get_db())
        .find_by_id(restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))
}

/// 写入后刷新完整度缓存并返回最新进度
async fn refreshed_progress(
    onboarding: &OnboardingService,
    restaurant_id: &str,
) -> AppResult<SetupProgress> {
    onboarding.refresh(restaurant_id).await?;
    Ok(onboarding.progress(restaurant_id).await?)
}

/// GET /setup
pub async fn overview(
    State(state): State<ServerState>,
    OwnerSession(session): OwnerSession,
) -> AppResult<ApiResponse<SetupOverview>> {
    let restaurant = load_restaurant(&state, &session.restaurant_id).await?;
    let progress = state.onboarding().progress(&session.restaurant_id).await?;

    Ok(ApiResponse::success(SetupOverview {
        page: PageView::new("setup", "Set up your restaurant"),
        progress,
        basic_info: basic_info_view(&restaurant),
    }))
}

/// POST /setup/basic-info
pub async fn update_basic_info(
    State(state): State<ServerState>,
    OwnerSession(session): OwnerSession,
    Json(mut req): Json<BasicInfoRequest>,
) -> AppResult<ApiResponse<SetupProgress>> {
    req.normalize();
    req.validate().map_err(validation_error)?;

    RestaurantRepository::new(state.get_db())
        .update_basic_info(&session.restaurant_id, req.into_update())
        .await?;
    tracing::info!(restaurant_id = %session.restaurant_id, "Basic info updated");

    let progress = refreshed_progress(&state.onboarding(), &session.restaurant_id).await?;
    Ok(ApiResponse::success_with_message("Basic information saved", progress))
}

/// GET /setup/hours
pub async fn hours_page(
    State(state): State<ServerState>,
    OwnerSession(session): OwnerSession,
) -> AppResult<ApiResponse<PageView>> {
    let restaurant = load_restaurant(&state, &session.restaurant_id).await?;
    let hours = if restaurant.business_hours.is_empty() {
        BusinessHours::default_week()
    } else {
        restaurant.business_hours
    };

    Ok(ApiResponse::success(
        PageView::new("setup-hours", "Business hours").with_data(json!({ "businessHours": hours })),
    ))
}

/// POST /setup/hours
pub async fn update_business_hours(
    State(state): State<ServerState>,
    OwnerSession(session): OwnerSession,
    Json(req): Json<HoursRequest>,
) -> AppResult<ApiResponse<SetupProgress>> {
    let week = BusinessHours::validate_week(req.business_hours)?;

    RestaurantRepository::new(state.get_db())
        .set_business_hours(&session.restaurant_id, week)
        .await?;
    tracing::info!(restaurant_id = %session.restaurant_id, "Business hours updated");

    let progress = refreshed_progress(&state.onboarding(), &session.restaurant_id).await?;
    Ok(ApiResponse::success_with_message("Business hours saved", progress))
}

/// GET /setup/menu
pub async fn menu_page(
    State(state): State<ServerState>,
    OwnerSession(session): OwnerSession,
) -> AppResult<ApiResponse<PageView>> {
    let categories: Vec<MenuCategoryView> = MenuCategoryRepository::new(state.get_db())
        .find_by_restaurant(&session.restaurant_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let items: Vec<MenuItemView> = MenuItemRepository::new(state.get_db())
        .find_by_restaurant(&session.restaurant_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ApiResponse::success(PageView::new("setup-menu", "Menu").with_data(
        json!({ "categories": categories, "items": items }),
    )))
}

/// POST /setup/menu/categories
pub async fn add_category(
    State(state): State<ServerState>,
    OwnerSession(session): OwnerSession,
    Json(mut req): Json<CategoryRequest>,
) -> AppResult<ApiResponse<MenuCategoryView>> {
    req.name = req.name.trim().to_string();
    req.validate().map_err(validation_error)?;

    let category = MenuCategoryRepository::new(state.get_db())
        .create(MenuCategoryCreate {
            restaurant_id: session.restaurant_id.clone(),
            name: req.name,
            description: req.description,
            image: req.image,
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => {
                AppError::with_message(ErrorCode::CategoryNameExists, "Category already exists")
            }
            other => repo_error(other),
        })?;
    tracing::info!(
        restaurant_id = %session.restaurant_id,
        category = %category.name,
        "Menu category added"
    );

    state.onboarding().refresh(&session.restaurant_id).await?;
    Ok(ApiResponse::success_with_message("Category added", category.into()))
}

/// POST /setup/menu/items
pub async fn add_item(
    State(state): State<ServerState>,
    OwnerSession(session): OwnerSession,
    Json(mut req): Json<ItemRequest>,
) -> AppResult<ApiResponse<MenuItemView>> {
    req.name = req.name.trim().to_string();
    req.category = req.category.trim().to_string();
    req.validate().map_err(validation_error)?;

    let category = MenuCategoryRepository::new(state.get_db())
        .find_by_name(&session.restaurant_id, &req.category)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::CategoryNotFound, "Category not found"))?;

    let item = MenuItemRepository::new(state.get_db())
        .create(MenuItemCreate {
            restaurant_id: session.restaurant_id.clone(),
            name: req.name,
            description: req.description,
            price: req.price,
            category: category.name,
            image: req.image,
            preparation_time: req.preparation_time,
            ingredients: req.ingredients,
            allergens: req.allergens,
            nutritional_info: req.nutritional_info,
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => {
                AppError::with_message(ErrorCode::MenuItemNameExists, "Menu item already exists")
            }
            RepoError::Validation(msg) => {
                AppError::with_message(ErrorCode::MenuItemInvalidPrice, msg)
            }
            other => repo_error(other),
        })?;
    tracing::info!(
        restaurant_id = %session.restaurant_id,
        item = %item.name,
        "Menu item added"
    );

    state.onboarding().refresh(&session.restaurant_id).await?;
    Ok(ApiResponse::success_with_message("Menu item added", item.into()))
}

/// POST /setup/complete
///
/// 检查顺序: 营业时间 -> 菜单分类 -> 菜品 -> 完整度判定 (基础信息)
pub async fn complete(
    State(state): State<ServerState>,
    OwnerSession(session): OwnerSession,
) -> AppResult<ApiResponse<RedirectData>> {
    let onboarding = state.onboarding();
    let snapshot = onboarding
        .snapshot(&session.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let incomplete = |message: &str| AppError::with_message(ErrorCode::ProfileIncomplete, message);
    if snapshot.business_hours == 0 {
        return Err(incomplete("Please set your business hours"));
    }
    if snapshot.menu_categories == 0 {
        return Err(incomplete("Please add at least one menu category"));
    }
    if onboarding.menu_item_count(&session.restaurant_id).await? == 0 {
        return Err(incomplete("Please add at least one menu item"));
    }
    if !snapshot.is_complete() {
        return Err(incomplete("Please complete your basic information"));
    }

    onboarding.refresh(&session.restaurant_id).await?;
    tracing::info!(restaurant_id = %session.restaurant_id, "Profile setup completed");

    Ok(ApiResponse::success_with_message(
        "Profile setup completed!",
        RedirectData::to(DASHBOARD_PATH),
    ))
}
