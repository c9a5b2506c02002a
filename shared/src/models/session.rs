//! Session Model
//!
//! The identity carried by the signed session cookie. Handlers receive it
//! explicitly (request extension / extractor); nothing reads it from
//! ambient state.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Per-request session
///
/// Invariant: `is_logged_in` implies non-empty `user_id` and
/// `restaurant_id`. Use [`Session::is_authenticated`], which checks both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub restaurant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    pub is_logged_in: bool,
}

impl Session {
    /// A never-authenticated (or logged out) session
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session for the restaurant account holder
    pub fn owner(restaurant_id: impl Into<String>) -> Self {
        let restaurant_id = restaurant_id.into();
        Self {
            user_id: restaurant_id.clone(),
            restaurant_id,
            role: Some(Role::Owner),
            staff_id: None,
            is_logged_in: true,
        }
    }

    /// Session for a staff sub-account
    pub fn staff(
        restaurant_id: impl Into<String>,
        staff_id: impl Into<String>,
        role: Role,
    ) -> Self {
        let staff_id = staff_id.into();
        Self {
            user_id: staff_id.clone(),
            restaurant_id: restaurant_id.into(),
            role: Some(role),
            staff_id: Some(staff_id),
            is_logged_in: true,
        }
    }

    /// Same restaurant identity with role and staff binding dropped
    pub fn without_role(self) -> Self {
        Self {
            user_id: self.restaurant_id.clone(),
            role: None,
            staff_id: None,
            ..self
        }
    }

    /// Logged in and carrying both identifiers
    pub fn is_authenticated(&self) -> bool {
        self.is_logged_in && !self.user_id.is_empty() && !self.restaurant_id.is_empty()
    }

    pub fn is_owner(&self) -> bool {
        self.is_authenticated() && self.role == Some(Role::Owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(!session.is_owner());
    }

    #[test]
    fn test_owner_session_uses_restaurant_as_user() {
        let session = Session::owner("r1");
        assert_eq!(session.user_id, "r1");
        assert_eq!(session.restaurant_id, "r1");
        assert!(session.is_owner());
        assert!(session.staff_id.is_none());
    }

    #[test]
    fn test_staff_session() {
        let session = Session::staff("r1", "s1", Role::Waiter);
        assert_eq!(session.user_id, "s1");
        assert_eq!(session.staff_id.as_deref(), Some("s1"));
        assert!(session.is_authenticated());
        assert!(!session.is_owner());
    }

    #[test]
    fn test_without_role_keeps_restaurant() {
        let session = Session::staff("r1", "s1", Role::Chef).without_role();
        assert!(session.is_authenticated());
        assert_eq!(session.user_id, "r1");
        assert_eq!(session.role, None);
        assert_eq!(session.staff_id, None);
    }

    #[test]
    fn test_logged_in_flag_without_ids_is_not_authenticated() {
        let session = Session {
            is_logged_in: true,
            ..Session::default()
        };
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_session_json_shape() {
        let json = serde_json::to_value(Session::staff("r1", "s1", Role::Waiter)).unwrap();
        assert_eq!(json["restaurantId"], "r1");
        assert_eq!(json["role"], "WAITER");
        assert_eq!(json["isLoggedIn"], true);
    }
}
