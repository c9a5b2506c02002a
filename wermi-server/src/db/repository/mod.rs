//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod menu_category;
pub mod menu_item;
pub mod restaurant;
pub mod staff;

// Re-exports
pub use menu_category::MenuCategoryRepository;
pub use menu_item::MenuItemRepository;
pub use restaurant::RestaurantRepository;
pub use staff::StaffRepository;

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // unique index violation
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Row shape of `SELECT count() ... GROUP ALL`
#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub count: i64,
}

/// New document id
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
