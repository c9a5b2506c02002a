//! Staff Repository

use super::{BaseRepository, RepoError, RepoResult, new_id};
use crate::db::models::{Staff, StaffCreate};
use shared::Role;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "staff";

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All staff of a restaurant, including inactive
    pub async fn find_by_restaurant(&self, restaurant_id: &str) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query("SELECT * FROM staff WHERE restaurant_id = $rid ORDER BY full_name")
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(staff)
    }

    /// Active staff accounts with this email, across restaurants
    pub async fn find_active_by_email(&self, email: &str) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query("SELECT * FROM staff WHERE email = $email AND is_active = true")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(staff)
    }

    /// Active staff of a restaurant holding a role
    pub async fn find_active_by_role(
        &self,
        restaurant_id: &str,
        role: Role,
    ) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query(
                "SELECT * FROM staff WHERE restaurant_id = $rid AND role = $role AND is_active = true",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind(("role", role))
            .await?
            .take(0)?;
        Ok(staff)
    }

    /// Find staff by email within a restaurant
    pub async fn find_by_email(
        &self,
        restaurant_id: &str,
        email: &str,
    ) -> RepoResult<Option<Staff>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM staff WHERE restaurant_id = $rid AND email = $email LIMIT 1")
            .bind(("rid", restaurant_id.to_string()))
            .bind(("email", email.to_string()))
            .await?;
        let staff: Vec<Staff> = result.take(0)?;
        Ok(staff.into_iter().next())
    }

    /// Create a new staff account
    pub async fn create(&self, data: StaffCreate) -> RepoResult<Staff> {
        if data.role == Role::Owner {
            return Err(RepoError::Validation(
                "Staff accounts cannot hold the OWNER role".to_string(),
            ));
        }
        if self
            .find_by_email(&data.restaurant_id, &data.email)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Staff email '{}' already exists",
                data.email
            )));
        }

        let staff = Staff {
            staff_id: new_id(),
            restaurant_id: data.restaurant_id,
            full_name: data.full_name,
            email: data.email,
            hash_pass: data.hash_pass,
            role: data.role,
            phone_number: data.phone_number,
            is_active: true,
            permissions: data.permissions,
            last_login: None,
            created_at: now_millis(),
        };

        let mut result = self
            .base
            .db()
            .query("CREATE type::thing($tb, $id) CONTENT $data RETURN AFTER")
            .bind(("tb", TABLE))
            .bind(("id", staff.staff_id.clone()))
            .bind(("data", staff))
            .await?;

        let created: Option<Staff> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create staff".to_string()))
    }

    /// Stamp a successful login
    pub async fn touch_last_login(&self, staff_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE staff SET last_login = $now WHERE staff_id = $id")
            .bind(("id", staff_id.to_string()))
            .bind(("now", now_millis()))
            .await?
            .check()?;
        Ok(())
    }
}
