//! Reservation API Handlers
//!
//! 预约前置检查给出友好错误码；真正的并发竞争由部分唯一索引裁决，
//! 落败方的唯一约束冲突在这里映射回对应错误码。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::ErrorCode;
use shared::models::{Reservation, ReservationCreate, ReservationWithDetails};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, reservation, spot};
use crate::utils::validation::validate_vehicle_number;
use crate::utils::{ApiResponse, AppError, AppResult};

/// 预约视图：详情 + 实时时长和费用
#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: ReservationWithDetails,
    pub duration_hours: Decimal,
    pub cost: Decimal,
}

impl ReservationView {
    fn at(reservation: ReservationWithDetails, now_ms: i64) -> Self {
        let duration_hours = reservation.duration_hours(now_ms);
        let cost = reservation.cost(now_ms);
        Self {
            reservation,
            duration_hours,
            cost,
        }
    }
}

/// 结账响应
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub reservation: Reservation,
    pub duration_hours: Decimal,
    pub cost: Decimal,
}

/// 分页响应
#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}

/// POST /api/reservations - 预约车位
///
/// 车牌号统一大写存储。每个用户同时最多一条未结账预约。
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    let vehicle_number = payload.vehicle_number.trim().to_uppercase();
    validate_vehicle_number(&vehicle_number)?;

    if reservation::find_open_by_user(&state.pool, user.id)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::ActiveReservationExists));
    }

    let target = spot::find_by_id(&state.pool, payload.spot_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SpotNotFound))?;
    if target.is_occupied {
        return Err(AppError::new(ErrorCode::SpotOccupied));
    }

    let created = match reservation::create(&state.pool, user.id, payload.spot_id, &vehicle_number)
        .await
    {
        Err(RepoError::Duplicate(_)) => {
            // 竞争落败：要么本用户并发下了两单，要么车位刚被别人抢走
            if reservation::find_open_by_user(&state.pool, user.id)
                .await?
                .is_some()
            {
                return Err(AppError::new(ErrorCode::ActiveReservationExists));
            }
            return Err(AppError::new(ErrorCode::SpotOccupied));
        }
        other => other?,
    };

    tracing::info!(
        reservation_id = created.id,
        user_id = user.id,
        spot_id = created.spot_id,
        "Reservation created"
    );
    Ok(Json(created))
}

/// GET /api/reservations/current - 当前未结账预约 (含实时费用)
pub async fn current(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ReservationView>> {
    let open = reservation::find_open_by_user(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound))?;

    let details = reservation::find_details_by_id(&state.pool, open.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound))?;

    Ok(Json(ReservationView::at(details, now_millis())))
}

/// POST /api/reservations/:id/checkout - 结账释放车位
///
/// 只能由预约本人操作；重复结账返回 409。
pub async fn checkout(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<CheckoutResponse>> {
    let existing = reservation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound))?;

    if existing.user_id != user.id {
        return Err(AppError::forbidden("Reservation belongs to another user"));
    }
    if !existing.is_open() {
        return Err(AppError::new(ErrorCode::ReservationAlreadyClosed));
    }

    let now = now_millis();
    let closed = match reservation::close(&state.pool, id, now).await {
        // 并发结账：另一请求先行关闭
        Err(RepoError::NotFound(_)) => {
            return Err(AppError::new(ErrorCode::ReservationAlreadyClosed));
        }
        other => other?,
    };

    let duration_hours = closed.duration_hours(now);
    let cost = closed.cost(now);

    tracing::info!(
        reservation_id = id,
        user_id = user.id,
        %cost,
        "Reservation checked out"
    );
    Ok(Json(CheckoutResponse {
        reservation: closed,
        duration_hours,
        cost,
    }))
}

/// GET /api/reservations/history - 本人全部预约，倒序 (未结账的按当前时间计费)
pub async fn history(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ReservationView>>> {
    let now = now_millis();
    let rows = reservation::history_by_user(&state.pool, user.id).await?;
    let views = rows
        .into_iter()
        .map(|r| ReservationView::at(r, now))
        .collect();
    Ok(Json(views))
}

/// GET /api/admin/reservations?page=&per_page= - 全部预约分页
pub async fn admin_list(
    State(state): State<ServerState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PageResponse<ReservationView>>> {
    let page = pagination.page.max(1);
    let per_page = pagination.per_page.clamp(1, 100);
    // page is client-supplied, keep the offset arithmetic overflow-safe
    let offset = page.saturating_sub(1).saturating_mul(per_page);

    let now = now_millis();
    let total = reservation::count_all(&state.pool).await?;
    let rows = reservation::find_page(&state.pool, per_page, offset).await?;
    let items = rows
        .into_iter()
        .map(|r| ReservationView::at(r, now))
        .collect();

    Ok(Json(PageResponse {
        items,
        page,
        per_page,
        total,
    }))
}

/// POST /api/admin/reservations/:id/cancel - 管理员强制结束预约
pub async fn admin_cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Reservation>> {
    let existing = reservation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound))?;

    if !existing.is_open() {
        return Err(AppError::new(ErrorCode::ReservationAlreadyClosed));
    }

    let closed = match reservation::close(&state.pool, id, now_millis()).await {
        Err(RepoError::NotFound(_)) => {
            return Err(AppError::new(ErrorCode::ReservationAlreadyClosed));
        }
        other => other?,
    };

    tracing::info!(reservation_id = id, admin_id = user.id, "Reservation cancelled by admin");
    Ok(ApiResponse::success_with_message(
        "Reservation cancelled",
        closed,
    ))
}
