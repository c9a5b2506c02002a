//! Staff Model

use serde::{Deserialize, Serialize};
use shared::Role;

/// Staff sub-account of a restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub staff_id: String,
    pub restaurant_id: String,
    pub full_name: String,
    pub email: String,
    pub hash_pass: String,
    /// Never `Role::Owner`
    pub role: Role,
    pub phone_number: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub last_login: Option<i64>,
    pub created_at: i64,
}

fn default_active() -> bool {
    true
}

/// Create staff payload (password already hashed)
#[derive(Debug, Clone)]
pub struct StaffCreate {
    pub restaurant_id: String,
    pub full_name: String,
    pub email: String,
    pub hash_pass: String,
    pub role: Role,
    pub phone_number: Option<String>,
    pub permissions: Vec<String>,
}

/// Staff listing entry (no credential)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffView {
    pub staff_id: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub permissions: Vec<String>,
    pub last_login: Option<i64>,
    pub created_at: i64,
}

impl From<Staff> for StaffView {
    fn from(s: Staff) -> Self {
        Self {
            staff_id: s.staff_id,
            full_name: s.full_name,
            email: s.email,
            role: s.role,
            phone_number: s.phone_number,
            is_active: s.is_active,
            permissions: s.permissions,
            last_login: s.last_login,
            created_at: s.created_at,
        }
    }
}
