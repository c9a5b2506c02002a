//! Restaurant Repository

use super::{BaseRepository, RepoError, RepoResult, new_id};
use crate::db::models::{BasicInfoUpdate, Restaurant, RestaurantCreate, RestaurantSettings};
use shared::BusinessHours;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find restaurant by id
    pub async fn find_by_id(&self, restaurant_id: &str) -> RepoResult<Option<Restaurant>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE restaurant_id = $id LIMIT 1")
            .bind(("id", restaurant_id.to_string()))
            .await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        Ok(restaurants.into_iter().next())
    }

    /// Find restaurant by (normalised) email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Restaurant>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        Ok(restaurants.into_iter().next())
    }

    /// Find restaurant by business name
    pub async fn find_by_business_name(&self, name: &str) -> RepoResult<Option<Restaurant>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE business_name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        Ok(restaurants.into_iter().next())
    }

    /// Create a new restaurant account
    pub async fn create(&self, data: RestaurantCreate) -> RepoResult<Restaurant> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                data.email
            )));
        }
        if self.find_by_business_name(&data.business_name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Business name '{}' already exists",
                data.business_name
            )));
        }

        let now = now_millis();
        let restaurant = Restaurant {
            restaurant_id: new_id(),
            business_name: data.business_name,
            owner_name: data.owner_name,
            email: data.email,
            hash_pass: data.hash_pass,
            phone_number: data.phone_number,
            address: data.address,
            license_number: data.license_number,
            is_verified: false,
            logo: None,
            cover_image: None,
            cuisine: Vec::new(),
            settings: RestaurantSettings::default(),
            business_hours: Vec::new(),
            is_profile_complete: false,
            created_at: now,
            updated_at: now,
            last_login: None,
        };

        let mut result = self
            .base
            .db()
            .query("CREATE type::thing($tb, $id) CONTENT $data RETURN AFTER")
            .bind(("tb", TABLE))
            .bind(("id", restaurant.restaurant_id.clone()))
            .bind(("data", restaurant))
            .await?;

        let created: Option<Restaurant> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    /// Write the basic-info step
    pub async fn update_basic_info(
        &self,
        restaurant_id: &str,
        data: BasicInfoUpdate,
    ) -> RepoResult<Restaurant> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE restaurant SET
                    logo = $logo,
                    cover_image = $cover_image,
                    cuisine = $cuisine,
                    settings = $settings,
                    updated_at = $now
                WHERE restaurant_id = $id
                RETURN AFTER"#,
            )
            .bind(("id", restaurant_id.to_string()))
            .bind(("logo", data.logo))
            .bind(("cover_image", data.cover_image))
            .bind(("cuisine", data.cuisine))
            .bind(("settings", data.settings))
            .bind(("now", now_millis()))
            .await?;

        first_or_not_found(result.take(0)?, restaurant_id)
    }

    /// Replace the weekly business hours
    pub async fn set_business_hours(
        &self,
        restaurant_id: &str,
        hours: Vec<BusinessHours>,
    ) -> RepoResult<Restaurant> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE restaurant SET business_hours = $hours, updated_at = $now \
                 WHERE restaurant_id = $id RETURN AFTER",
            )
            .bind(("id", restaurant_id.to_string()))
            .bind(("hours", hours))
            .bind(("now", now_millis()))
            .await?;

        first_or_not_found(result.take(0)?, restaurant_id)
    }

    /// Overwrite the cached completeness flag
    pub async fn set_profile_complete(&self, restaurant_id: &str, complete: bool) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE restaurant SET is_profile_complete = $complete WHERE restaurant_id = $id")
            .bind(("id", restaurant_id.to_string()))
            .bind(("complete", complete))
            .await?
            .check()?;
        Ok(())
    }

    /// Stamp a successful login
    pub async fn touch_last_login(&self, restaurant_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE restaurant SET last_login = $now WHERE restaurant_id = $id")
            .bind(("id", restaurant_id.to_string()))
            .bind(("now", now_millis()))
            .await?
            .check()?;
        Ok(())
    }
}

fn first_or_not_found(rows: Vec<Restaurant>, restaurant_id: &str) -> RepoResult<Restaurant> {
    rows.into_iter()
        .next()
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", restaurant_id)))
}
