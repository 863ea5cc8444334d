//! User Admin API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::ErrorCode;
use shared::models::UserResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{ApiResponse, AppError, AppResult};

/// GET /api/admin/users - 所有注册用户 (不含管理员)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = user::find_non_admins(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// DELETE /api/admin/users/:id - 删除用户
///
/// 管理员账号不可删除。用户的预约记录级联删除，
/// 未结账的预约随之消失，对应车位立即空闲。
pub async fn delete(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    let target = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    if target.is_admin {
        return Err(AppError::new(ErrorCode::CannotDeleteAdmin));
    }

    user::delete(&state.pool, id).await?;
    tracing::info!(user_id = id, admin_id = admin.id, "User deleted");
    Ok(ApiResponse::<()>::ok())
}
