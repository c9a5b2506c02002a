//! Authentication Handlers
//!
//! 注册、登录、角色选择和登出。未知邮箱与错误密码返回同一个
//! "Invalid credentials"；没有任何候选账户时仍对占位哈希做一次校验，
//! 让两种失败耗时一致。

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::header::SET_COOKIE;
use serde::{Deserialize, Serialize};
use shared::util::normalize_email;
use shared::{Role, Session};
use validator::Validate;

use crate::api::{ApiResponse, AppError, AppResult, RedirectData};
use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::gate::{DASHBOARD_PATH, ROLE_PATH, SETUP_PATH};
use crate::auth::{CurrentSession, ProfileStatus};
use crate::core::ServerState;
use crate::db::models::RestaurantCreate;
use crate::db::repository::{RepoError, RestaurantRepository, StaffRepository};
use crate::security_log;
use crate::utils::password::{dummy_hash, hash_password, verify_password};
use crate::utils::validation::validate_password_strength;
use crate::utils::{ErrorCode, repo_error, validation_error};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "Business name must be at least 2 characters."))]
    pub business_name: String,
    #[validate(length(min = 2, message = "Owner's name must be at least 2 characters."))]
    pub owner_name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(
        length(min = 8, message = "Password must be at least 8 characters."),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(length(min = 5, message = "Please enter a valid address."))]
    pub address: String,
    #[serde(default)]
    pub license_number: Option<String>,
}

impl RegisterRequest {
    fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
        self.business_name = self.business_name.trim().to_string();
        self.owner_name = self.owner_name.trim().to_string();
        self.phone_number = self.phone_number.trim().to_string();
        self.address = self.address.trim().to_string();
        self.license_number = self
            .license_number
            .take()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub restaurant_id: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectRoleRequest {
    pub role: Role,
    pub password: String,
}

/// POST /auth/register
///
/// 创建餐厅账户；不建立会话，客户端随后跳转登录页。
pub async fn register(
    State(state): State<ServerState>,
    Json(mut req): Json<RegisterRequest>,
) -> AppResult<ApiResponse<RegisterData>> {
    req.normalize();
    req.validate().map_err(validation_error)?;

    let repo = RestaurantRepository::new(state.get_db());
    if let Some(err) = taken(&repo, &req.email, &req.business_name).await? {
        return Err(err);
    }

    let hash_pass = hash_password(&req.password)?;
    let created = repo
        .create(RestaurantCreate {
            business_name: req.business_name.clone(),
            owner_name: req.owner_name,
            email: req.email.clone(),
            hash_pass,
            phone_number: req.phone_number,
            address: req.address,
            license_number: req.license_number,
        })
        .await;

    let restaurant = match created {
        Ok(restaurant) => restaurant,
        // 并发注册：唯一索引或事务冲突，重新查一次是哪一项被占用
        Err(err @ (RepoError::Duplicate(_) | RepoError::Database(_))) => {
            tracing::debug!(error = %err, "Restaurant create lost a race");
            return Err(match taken(&repo, &req.email, &req.business_name).await? {
                Some(conflict) => conflict,
                None => repo_error(err),
            });
        }
        Err(err) => return Err(repo_error(err)),
    };

    tracing::info!(
        restaurant_id = %restaurant.restaurant_id,
        business_name = %restaurant.business_name,
        "Restaurant registered"
    );

    Ok(ApiResponse::success_with_message(
        "Registration successful!",
        RegisterData {
            restaurant_id: restaurant.restaurant_id,
            redirect_url: "/auth/login".to_string(),
        },
    ))
}

/// Which unique registration field is already held by another restaurant
async fn taken(
    repo: &RestaurantRepository,
    email: &str,
    business_name: &str,
) -> AppResult<Option<AppError>> {
    if repo.find_by_email(email).await?.is_some() {
        return Ok(Some(AppError::with_message(
            ErrorCode::EmailAlreadyExists,
            "Email already exists",
        )));
    }
    if repo.find_by_business_name(business_name).await?.is_some() {
        return Ok(Some(AppError::with_message(
            ErrorCode::BusinessNameExists,
            "Business name already exists",
        )));
    }
    Ok(None)
}

/// POST /auth/login
///
/// 先匹配餐厅账户 (OWNER)；没有餐厅使用该邮箱时再匹配同邮箱的在职员工。
pub async fn login(
    State(state): State<ServerState>,
    Json(mut req): Json<LoginRequest>,
) -> AppResult<Response> {
    req.email = normalize_email(&req.email);
    req.validate().map_err(validation_error)?;

    let Some(session) = authenticate(&state, &req.email, &req.password).await? else {
        security_log!("WARN", "login_failed", email = req.email.clone());
        return Err(AppError::invalid_credentials());
    };

    tracing::info!(
        user_id = %session.user_id,
        restaurant_id = %session.restaurant_id,
        role = ?session.role,
        "User logged in"
    );

    let target = landing_for(&state, &session).await;
    session_response(
        &state,
        &session,
        ApiResponse::success_with_message("Login successful!", RedirectData::to(target)),
    )
}

async fn authenticate(
    state: &ServerState,
    email: &str,
    password: &str,
) -> AppResult<Option<Session>> {
    let restaurants = RestaurantRepository::new(state.get_db());
    let staff = StaffRepository::new(state.get_db());

    // 邮箱属于某个餐厅账户时只认该账户的密码
    if let Some(owner) = restaurants.find_by_email(email).await? {
        if verify_password(password, &owner.hash_pass) {
            restaurants.touch_last_login(&owner.restaurant_id).await?;
            return Ok(Some(Session::owner(owner.restaurant_id)));
        }
        return Ok(None);
    }

    let mut candidates = 0usize;
    for member in staff.find_active_by_email(email).await? {
        candidates += 1;
        if verify_password(password, &member.hash_pass) {
            staff.touch_last_login(&member.staff_id).await?;
            return Ok(Some(Session::staff(
                member.restaurant_id,
                member.staff_id,
                member.role,
            )));
        }
    }

    if candidates == 0 {
        let _ = verify_password(password, dummy_hash());
    }
    Ok(None)
}

/// POST /auth/role
///
/// OWNER 用餐厅密码确认；其他角色用该餐厅持有此角色的在职员工密码确认。
pub async fn select_role(
    State(state): State<ServerState>,
    CurrentSession(current): CurrentSession,
    Json(req): Json<SelectRoleRequest>,
) -> AppResult<Response> {
    let restaurant_id = current.restaurant_id.clone();

    let session = match req.role {
        Role::Owner => {
            let restaurants = RestaurantRepository::new(state.get_db());
            let restaurant = restaurants
                .find_by_id(&restaurant_id)
                .await?
                .ok_or_else(AppError::not_authenticated)?;
            verify_password(&req.password, &restaurant.hash_pass)
                .then(|| Session::owner(restaurant.restaurant_id))
        }
        role => {
            let staff = StaffRepository::new(state.get_db());
            let mut matched = None;
            for member in staff.find_active_by_role(&restaurant_id, role).await? {
                if verify_password(&req.password, &member.hash_pass) {
                    staff.touch_last_login(&member.staff_id).await?;
                    matched = Some(Session::staff(
                        member.restaurant_id,
                        member.staff_id,
                        member.role,
                    ));
                    break;
                }
            }
            matched
        }
    };

    let Some(session) = session else {
        security_log!(
            "WARN",
            "role_selection_failed",
            restaurant_id = restaurant_id,
            role = req.role.to_string()
        );
        return Err(AppError::invalid_credentials());
    };

    tracing::info!(
        user_id = %session.user_id,
        restaurant_id = %session.restaurant_id,
        role = ?session.role,
        "Role selected"
    );

    let target = landing_for(&state, &session).await;
    session_response(
        &state,
        &session,
        ApiResponse::success_with_message("Role selected", RedirectData::to(target)),
    )
}

/// POST /dashboard/release-role
pub async fn release_role(
    State(state): State<ServerState>,
    CurrentSession(current): CurrentSession,
) -> AppResult<Response> {
    let session = current.without_role();
    tracing::info!(restaurant_id = %session.restaurant_id, "Role released");
    session_response(
        &state,
        &session,
        ApiResponse::success_with_message("Role released", RedirectData::to(ROLE_PATH)),
    )
}

/// POST /logout
///
/// 总是清除 Cookie，未登录时同样成功。
pub async fn logout(State(state): State<ServerState>) -> Response {
    let cookie = clear_session_cookie(state.config.is_production());
    (
        [(SET_COOKIE, cookie)],
        ApiResponse::ok_with_message("Logged out successfully"),
    )
        .into_response()
}

/// Landing page after authentication
///
/// OWNER 按资料完整度去仪表盘或开店向导 (查询失败按未完成处理)，
/// 员工直接进仪表盘。
async fn landing_for(state: &ServerState, session: &Session) -> &'static str {
    if !session.is_owner() {
        return DASHBOARD_PATH;
    }
    match state
        .onboarding()
        .is_profile_complete(&session.restaurant_id)
        .await
    {
        Ok(true) => DASHBOARD_PATH,
        _ => SETUP_PATH,
    }
}

/// Sign `session` into the cookie and attach it to `body`
fn session_response<T: Serialize>(
    state: &ServerState,
    session: &Session,
    body: ApiResponse<T>,
) -> AppResult<Response> {
    let token = state.session_service.issue(session)?;
    let cookie = session_cookie(
        &token,
        state.config.session.max_age_seconds(),
        state.config.is_production(),
    );
    Ok(([(SET_COOKIE, cookie)], body).into_response())
}
