//! Page descriptor handlers

use serde::Serialize;
use serde_json::{Value, json};
use shared::Role;

use crate::api::ApiResponse;
use crate::auth::CurrentSession;

/// What the web client needs to render a page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub page: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl PageView {
    pub fn new(page: &'static str, title: &'static str) -> Self {
        Self {
            page,
            title,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// GET / - landing page
pub async fn home() -> ApiResponse<PageView> {
    ApiResponse::success(PageView::new("home", "Wermi").with_data(json!({
        "links": [
            { "title": "Login", "href": "/auth/login" },
            { "title": "Register", "href": "/auth/register" },
        ]
    })))
}

/// GET /auth/login
pub async fn login() -> ApiResponse<PageView> {
    ApiResponse::success(PageView::new("login", "Login").with_data(json!({
        "fields": ["email", "password"],
        "action": "/auth/login",
    })))
}

/// GET /auth/register
pub async fn register() -> ApiResponse<PageView> {
    ApiResponse::success(PageView::new("register", "Register your restaurant").with_data(json!({
        "fields": [
            "businessName",
            "ownerName",
            "email",
            "password",
            "phoneNumber",
            "address",
            "licenseNumber",
        ],
        "action": "/auth/register",
    })))
}

/// GET /auth/forgot-password
pub async fn forgot_password() -> ApiResponse<PageView> {
    ApiResponse::success(PageView::new("forgot-password", "Forgot password").with_data(json!({
        "fields": ["email"],
    })))
}

/// GET /auth/role - the gate only lets logged-in sessions without a role here
pub async fn role(CurrentSession(session): CurrentSession) -> ApiResponse<PageView> {
    let roles: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
    ApiResponse::success(PageView::new("role", "Select your role").with_data(json!({
        "restaurantId": session.restaurant_id,
        "roles": roles,
        "action": "/auth/role",
    })))
}
