//! Database Module
//!
//! Embedded SurrealDB: RocksDB on disk, in-memory engine for tests.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::core::ServerError;

const NAMESPACE: &str = "wermi";
const DATABASE: &str = "wermi";

/// Unique indexes backing the duplicate checks in the repositories
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS restaurant SCHEMALESS;
DEFINE INDEX IF NOT EXISTS restaurant_id_idx ON TABLE restaurant FIELDS restaurant_id UNIQUE;
DEFINE INDEX IF NOT EXISTS restaurant_email_idx ON TABLE restaurant FIELDS email UNIQUE;
DEFINE INDEX IF NOT EXISTS restaurant_business_name_idx ON TABLE restaurant FIELDS business_name UNIQUE;

DEFINE TABLE IF NOT EXISTS staff SCHEMALESS;
DEFINE INDEX IF NOT EXISTS staff_id_idx ON TABLE staff FIELDS staff_id UNIQUE;
DEFINE INDEX IF NOT EXISTS staff_email_idx ON TABLE staff FIELDS restaurant_id, email UNIQUE;

DEFINE TABLE IF NOT EXISTS menu_category SCHEMALESS;
DEFINE INDEX IF NOT EXISTS menu_category_name_idx ON TABLE menu_category FIELDS restaurant_id, name UNIQUE;

DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;
DEFINE INDEX IF NOT EXISTS menu_item_name_idx ON TABLE menu_item FIELDS restaurant_id, name UNIQUE;
"#;

/// Database service
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database
    pub async fn open(db_path: &str) -> Result<Self, ServerError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to open database: {e}")))?;
        tracing::info!("Database opened at {}", db_path);
        Self::prepare(db).await
    }

    /// In-memory database
    pub async fn memory() -> Result<Self, ServerError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| ServerError::Database(format!("Failed to start in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, ServerError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| ServerError::Database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}
