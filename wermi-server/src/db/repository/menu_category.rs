//! Menu Category Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult, new_id};
use crate::db::models::{MenuCategory, MenuCategoryCreate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_category";

#[derive(Clone)]
pub struct MenuCategoryRepository {
    base: BaseRepository,
}

impl MenuCategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Categories of a restaurant in display order
    pub async fn find_by_restaurant(&self, restaurant_id: &str) -> RepoResult<Vec<MenuCategory>> {
        let categories: Vec<MenuCategory> = self
            .base
            .db()
            .query(
                "SELECT * FROM menu_category WHERE restaurant_id = $rid ORDER BY display_order, name",
            )
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by exact name within a restaurant
    pub async fn find_by_name(
        &self,
        restaurant_id: &str,
        name: &str,
    ) -> RepoResult<Option<MenuCategory>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_category WHERE restaurant_id = $rid AND name = $name LIMIT 1")
            .bind(("rid", restaurant_id.to_string()))
            .bind(("name", name.to_string()))
            .await?;
        let categories: Vec<MenuCategory> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    pub async fn count(&self, restaurant_id: &str) -> RepoResult<usize> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM menu_category WHERE restaurant_id = $rid GROUP ALL")
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count.max(0) as usize).unwrap_or(0))
    }

    /// Create a category; names are unique per restaurant
    pub async fn create(&self, data: MenuCategoryCreate) -> RepoResult<MenuCategory> {
        if self
            .find_by_name(&data.restaurant_id, &data.name)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                data.name
            )));
        }

        let display_order = self.count(&data.restaurant_id).await? as i32;
        let category = MenuCategory {
            category_id: new_id(),
            restaurant_id: data.restaurant_id,
            name: data.name,
            description: data.description,
            image: data.image,
            is_active: true,
            display_order,
            created_at: now_millis(),
        };

        let mut result = self
            .base
            .db()
            .query("CREATE type::thing($tb, $id) CONTENT $data RETURN AFTER")
            .bind(("tb", TABLE))
            .bind(("id", category.category_id.clone()))
            .bind(("data", category))
            .await?;

        let created: Option<MenuCategory> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu category".to_string()))
    }
}
