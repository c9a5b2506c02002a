//! Role Model
//!
//! One closed set of roles shared by session claims and persisted staff
//! records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Restaurant account holder, full control
    Owner,
    Manager,
    Chef,
    Waiter,
    Cashier,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Owner,
        Role::Manager,
        Role::Chef,
        Role::Waiter,
        Role::Cashier,
    ];

    /// Wire name, as stored in sessions and staff records
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Manager => "MANAGER",
            Role::Chef => "CHEF",
            Role::Waiter => "WAITER",
            Role::Cashier => "CASHIER",
        }
    }

    pub const fn is_owner(&self) -> bool {
        matches!(self, Role::Owner)
    }

    /// Roles a staff sub-account may hold
    pub const fn is_staff(&self) -> bool {
        !self.is_owner()
    }

    /// Whether this role may view the staff roster
    pub const fn can_view_staff(&self) -> bool {
        matches!(self, Role::Owner | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Waiter).unwrap(), "\"WAITER\"");
        let role: Role = serde_json::from_str("\"OWNER\"").unwrap();
        assert_eq!(role, Role::Owner);
        assert!(serde_json::from_str::<Role>("\"HOST\"").is_err());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("cashier".parse::<Role>(), Ok(Role::Cashier));
        assert_eq!(" MANAGER ".parse::<Role>(), Ok(Role::Manager));
        assert_eq!(
            "admin".parse::<Role>(),
            Err(UnknownRole("admin".to_string()))
        );
    }

    #[test]
    fn test_staff_roles() {
        assert!(!Role::Owner.is_staff());
        assert!(Role::Chef.is_staff());
        assert!(Role::Manager.can_view_staff());
        assert!(!Role::Waiter.can_view_staff());
    }
}
