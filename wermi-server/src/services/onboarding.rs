//! 开店引导状态服务
//!
//! 完整度永远从六个字段现算 ([`OnboardingSnapshot::is_complete`])；
//! 餐厅文档上的 `is_profile_complete` 只是缓存，每次写入引导字段后由
//! [`OnboardingService::refresh`] 覆盖。

use shared::{OnboardingSnapshot, SetupProgress};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{ProfileStatus, StatusError};
use crate::db::repository::{
    MenuCategoryRepository, MenuItemRepository, RepoError, RepoResult, RestaurantRepository,
};

#[derive(Clone)]
pub struct OnboardingService {
    restaurants: RestaurantRepository,
    categories: MenuCategoryRepository,
    items: MenuItemRepository,
}

impl OnboardingService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            restaurants: RestaurantRepository::new(db.clone()),
            categories: MenuCategoryRepository::new(db.clone()),
            items: MenuItemRepository::new(db),
        }
    }

    /// Completeness inputs of a restaurant, `None` if it does not exist
    pub async fn snapshot(&self, restaurant_id: &str) -> RepoResult<Option<OnboardingSnapshot>> {
        let Some(restaurant) = self.restaurants.find_by_id(restaurant_id).await? else {
            return Ok(None);
        };
        let categories = self.categories.count(restaurant_id).await?;
        Ok(Some(restaurant.onboarding_snapshot(categories)))
    }

    /// Recompute completeness and overwrite the cached flag
    pub async fn refresh(&self, restaurant_id: &str) -> RepoResult<bool> {
        let snapshot = self
            .snapshot(restaurant_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", restaurant_id)))?;
        let complete = snapshot.is_complete();
        self.restaurants
            .set_profile_complete(restaurant_id, complete)
            .await?;
        tracing::debug!(restaurant_id = %restaurant_id, complete, "Profile completeness refreshed");
        Ok(complete)
    }

    /// Wizard progress
    pub async fn progress(&self, restaurant_id: &str) -> RepoResult<SetupProgress> {
        let snapshot = self
            .snapshot(restaurant_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", restaurant_id)))?;
        Ok(snapshot.progress())
    }

    pub async fn menu_item_count(&self, restaurant_id: &str) -> RepoResult<usize> {
        self.items.count(restaurant_id).await
    }
}

impl ProfileStatus for OnboardingService {
    async fn is_profile_complete(&self, restaurant_id: &str) -> Result<bool, StatusError> {
        match self.snapshot(restaurant_id).await {
            Ok(Some(snapshot)) => Ok(snapshot.is_complete()),
            Ok(None) => Err(StatusError::NotFound),
            Err(e) => Err(StatusError::Upstream(e.to_string())),
        }
    }
}
