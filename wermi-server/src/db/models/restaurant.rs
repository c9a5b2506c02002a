//! Restaurant Model

use serde::{Deserialize, Serialize};
use shared::{BusinessHours, OnboardingSnapshot};

/// Restaurant account (owner credential + business profile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub restaurant_id: String,
    pub business_name: String,
    pub owner_name: String,
    /// Normalised (trimmed, lowercase)
    pub email: String,
    /// Argon2 PHC string
    pub hash_pass: String,
    pub phone_number: String,
    pub address: String,
    pub license_number: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    pub logo: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub settings: RestaurantSettings,
    #[serde(default)]
    pub business_hours: Vec<BusinessHours>,
    /// Cached result of the completeness predicate, rewritten on every
    /// setup write
    #[serde(default)]
    pub is_profile_complete: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_login: Option<i64>,
}

impl Restaurant {
    /// Completeness inputs; category count comes from `menu_category`
    pub fn onboarding_snapshot(&self, menu_categories: usize) -> OnboardingSnapshot {
        OnboardingSnapshot {
            name: Some(self.business_name.clone()),
            cuisine: self.cuisine.clone(),
            currency: self.settings.currency.clone(),
            timezone: self.settings.timezone.clone(),
            business_hours: self.business_hours.len(),
            menu_categories,
        }
    }
}

/// Restaurant operating settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSettings {
    pub currency: Option<String>,
    pub timezone: Option<String>,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub service_charge: f64,
    #[serde(default = "default_true")]
    pub allow_reservations: bool,
    #[serde(default)]
    pub require_payment: bool,
    #[serde(default = "default_true")]
    pub auto_accept_orders: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RestaurantSettings {
    fn default() -> Self {
        Self {
            currency: None,
            timezone: None,
            tax_rate: 0.0,
            service_charge: 0.0,
            allow_reservations: true,
            require_payment: false,
            auto_accept_orders: true,
        }
    }
}

/// Create restaurant payload (password already hashed)
#[derive(Debug, Clone)]
pub struct RestaurantCreate {
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub hash_pass: String,
    pub phone_number: String,
    pub address: String,
    pub license_number: Option<String>,
}

/// Basic-info step payload
#[derive(Debug, Clone, Serialize)]
pub struct BasicInfoUpdate {
    pub logo: Option<String>,
    pub cover_image: Option<String>,
    pub cuisine: Vec<String>,
    pub settings: RestaurantSettings,
}

/// Account data exposed to the dashboard (no credential)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantAccount {
    pub restaurant_id: String,
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub license_number: Option<String>,
    pub created_at: i64,
}

impl From<Restaurant> for RestaurantAccount {
    fn from(r: Restaurant) -> Self {
        Self {
            restaurant_id: r.restaurant_id,
            business_name: r.business_name,
            owner_name: r.owner_name,
            email: r.email,
            phone_number: r.phone_number,
            address: r.address,
            license_number: r.license_number,
            created_at: r.created_at,
        }
    }
}
