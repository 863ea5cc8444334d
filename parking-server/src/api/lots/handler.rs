//! Parking Lot API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::ErrorCode;
use shared::models::{LotCreate, LotUpdate, LotWithAvailability, SpotWithStatus};

use crate::core::ServerState;
use crate::db::repository::{lot, spot};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_LOT_NAME_LEN, validate_lot_capacity, validate_optional_text,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult};

/// 停车场详情：基本信息 + 每个车位的占用状态
#[derive(Debug, Serialize, Deserialize)]
pub struct LotDetail {
    #[serde(flatten)]
    pub lot: LotWithAvailability,
    pub spots: Vec<SpotWithStatus>,
}

/// GET /api/lots - 所有停车场及可用车位数
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<LotWithAvailability>>> {
    let lots = lot::find_all_with_availability(&state.pool).await?;
    Ok(Json(lots))
}

/// GET /api/admin/lots - 管理端停车场列表
pub async fn admin_list(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<LotWithAvailability>>> {
    let lots = lot::find_all_with_availability(&state.pool).await?;
    Ok(Json(lots))
}

/// GET /api/admin/lots/:id - 停车场详情 (含车位状态)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LotDetail>> {
    let lot = lot::find_by_id_with_availability(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::LotNotFound))?;
    let spots = spot::find_by_lot(&state.pool, id, false).await?;
    Ok(Json(LotDetail { lot, spots }))
}

/// POST /api/admin/lots - 创建停车场并生成车位
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<LotCreate>,
) -> AppResult<Json<LotWithAvailability>> {
    validate_required_text(&payload.name, "name", MAX_LOT_NAME_LEN)?;
    validate_required_text(&payload.location, "location", MAX_ADDRESS_LEN)?;
    validate_lot_capacity(payload.total_spots)?;

    let created = lot::create(&state.pool, payload).await?;
    tracing::info!(lot_id = created.id, spots = created.total_spots, "Parking lot created");

    let lot = lot::find_by_id_with_availability(&state.pool, created.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::LotNotFound))?;
    Ok(Json(lot))
}

/// PUT /api/admin/lots/:id - 更新停车场
///
/// 容量只能增加；增加的车位立即可预约。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<LotUpdate>,
) -> AppResult<Json<LotWithAvailability>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_LOT_NAME_LEN)?;
    }
    validate_optional_text(&payload.location, "location", MAX_ADDRESS_LEN)?;
    if let Some(total) = payload.total_spots {
        validate_lot_capacity(total)?;
    }

    lot::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::LotNotFound))?;

    let updated = lot::update(&state.pool, id, payload).await?;
    tracing::info!(lot_id = updated.id, "Parking lot updated");

    let lot = lot::find_by_id_with_availability(&state.pool, updated.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::LotNotFound))?;
    Ok(Json(lot))
}

/// DELETE /api/admin/lots/:id - 删除停车场
///
/// 存在被占用的车位时拒绝；否则车位与历史预约级联删除。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    lot::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::LotNotFound))?;

    if !lot::delete_if_unoccupied(&state.pool, id).await? {
        let occupied = lot::count_occupied(&state.pool, id).await?;
        return Err(AppError::new(ErrorCode::LotHasOccupiedSpots)
            .with_detail("occupied_spots", occupied));
    }

    tracing::info!(lot_id = id, "Parking lot deleted");
    Ok(ApiResponse::<()>::ok())
}
