//! Menu Item Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult, new_id};
use crate::db::models::{MenuItem, MenuItemCreate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_restaurant(&self, restaurant_id: &str) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE restaurant_id = $rid ORDER BY category, name")
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_name(
        &self,
        restaurant_id: &str,
        name: &str,
    ) -> RepoResult<Option<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE restaurant_id = $rid AND name = $name LIMIT 1")
            .bind(("rid", restaurant_id.to_string()))
            .bind(("name", name.to_string()))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    pub async fn count(&self, restaurant_id: &str) -> RepoResult<usize> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM menu_item WHERE restaurant_id = $rid GROUP ALL")
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count.max(0) as usize).unwrap_or(0))
    }

    /// Create a menu item; names are unique per restaurant
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if data.price < 0.0 || !data.price.is_finite() {
            return Err(RepoError::Validation("Price must be positive".to_string()));
        }
        if self
            .find_by_name(&data.restaurant_id, &data.name)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Menu item '{}' already exists",
                data.name
            )));
        }

        let item = MenuItem {
            item_id: new_id(),
            restaurant_id: data.restaurant_id,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image: data.image,
            is_available: true,
            preparation_time: data.preparation_time,
            ingredients: data.ingredients,
            allergens: data.allergens,
            nutritional_info: data.nutritional_info,
            created_at: now_millis(),
        };

        let mut result = self
            .base
            .db()
            .query("CREATE type::thing($tb, $id) CONTENT $data RETURN AFTER")
            .bind(("tb", TABLE))
            .bind(("id", item.item_id.clone()))
            .bind(("data", item))
            .await?;

        let created: Option<MenuItem> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }
}
