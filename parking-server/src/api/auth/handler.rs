//! Auth API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::ErrorCode;
use shared::models::{UserCreate, UserResponse};

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, validate_email, validate_name, validate_password, validate_phone,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult};

/// 登录请求
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录响应：令牌 + 用户信息
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// POST /api/auth/register - 注册新用户 (公共)
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserResponse>> {
    validate_name(&payload.name)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_phone(&payload.phone)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    if payload.password != payload.confirm_password {
        return Err(AppError::validation("passwords do not match"));
    }

    if user::find_by_email(&state.pool, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::UserEmailExists));
    }

    let password_hash = hash_password(&payload.password)?;
    let created = match user::create(&state.pool, &payload, &password_hash).await {
        // 竞争注册同一邮箱时唯一约束兜底
        Err(crate::db::repository::RepoError::Duplicate(_)) => {
            return Err(AppError::new(ErrorCode::UserEmailExists));
        }
        other => other?,
    };

    tracing::info!(user_id = created.id, "User registered");
    Ok(Json(UserResponse::from(created)))
}

/// POST /api/auth/login - 登录，签发 JWT (公共)
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let Some(account) = user::find_by_email(&state.pool, &payload.email).await? else {
        security_log!("WARN", "login_failed", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(&payload.password, &account.password_hash)? {
        security_log!("WARN", "login_failed", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(account.id, &account.name, account.is_admin)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    security_log!("INFO", "login_success", user_id = account.id);
    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(account),
    }))
}

/// POST /api/auth/logout - 登出
///
/// 令牌是无状态的，服务端无会话可销毁；客户端丢弃令牌即可。
pub async fn logout(user: CurrentUser) -> ApiResponse<()> {
    security_log!("INFO", "logout", user_id = user.id);
    ApiResponse::<()>::ok()
}

/// GET /api/auth/me - 当前用户信息
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserResponse>> {
    let account = user::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(UserResponse::from(account)))
}
