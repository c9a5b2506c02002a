//! Staff Handlers

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use shared::Role;
use shared::util::normalize_email;
use validator::Validate;

use crate::api::{ApiResponse, AppError, AppResult};
use crate::auth::{OwnerSession, RoleSession};
use crate::core::ServerState;
use crate::db::models::{StaffCreate, StaffView};
use crate::db::repository::{RepoError, StaffRepository};
use crate::security_log;
use crate::utils::password::hash_password;
use crate::utils::validation::{validate_password_strength, validate_staff_role, validate_tags};
use crate::utils::{ErrorCode, repo_error, validation_error};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffRequest {
    #[validate(length(min = 2, message = "Full name must be at least 2 characters."))]
    pub full_name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(
        length(min = 8, message = "Password must be at least 8 characters."),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
    #[validate(custom(function = "validate_staff_role"))]
    pub role: Role,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub permissions: Vec<String>,
}

/// GET /dashboard/staff
pub async fn list(
    State(state): State<ServerState>,
    RoleSession(session, role): RoleSession,
) -> AppResult<ApiResponse<Vec<StaffView>>> {
    if !role.can_view_staff() {
        security_log!(
            "WARN",
            "staff_list_denied",
            user_id = session.user_id.clone(),
            role = role.to_string()
        );
        return Err(AppError::with_message(
            ErrorCode::PermissionDenied,
            "Only owners and managers can view staff",
        ));
    }

    let staff = StaffRepository::new(state.get_db())
        .find_by_restaurant(&session.restaurant_id)
        .await?;
    Ok(ApiResponse::success(
        staff.into_iter().map(StaffView::from).collect(),
    ))
}

/// POST /dashboard/staff
pub async fn create(
    State(state): State<ServerState>,
    OwnerSession(session): OwnerSession,
    Json(mut req): Json<StaffRequest>,
) -> AppResult<ApiResponse<StaffView>> {
    req.email = normalize_email(&req.email);
    req.full_name = req.full_name.trim().to_string();
    req.validate().map_err(validation_error)?;

    let hash_pass = hash_password(&req.password)?;
    let staff = StaffRepository::new(state.get_db())
        .create(StaffCreate {
            restaurant_id: session.restaurant_id.clone(),
            full_name: req.full_name,
            email: req.email,
            hash_pass,
            role: req.role,
            phone_number: req.phone_number.filter(|p| !p.trim().is_empty()),
            permissions: req.permissions,
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => {
                AppError::with_message(ErrorCode::StaffEmailExists, "Staff email already exists")
            }
            RepoError::Validation(msg) => AppError::with_message(ErrorCode::StaffRoleInvalid, msg),
            other => repo_error(other),
        })?;

    tracing::info!(
        restaurant_id = %session.restaurant_id,
        staff_id = %staff.staff_id,
        role = %staff.role,
        "Staff member created"
    );
    Ok(ApiResponse::success_with_message(
        "Staff member created",
        StaffView::from(staff),
    ))
}
