//! Parking Spot API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::ErrorCode;
use shared::models::SpotWithStatus;

use crate::core::ServerState;
use crate::db::repository::{lot, spot};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct SpotListQuery {
    /// available=true 时只返回空闲车位
    #[serde(default)]
    pub available: bool,
}

/// GET /api/lots/:lot_id/spots - 某停车场的车位列表
pub async fn list_by_lot(
    State(state): State<ServerState>,
    Path(lot_id): Path<i64>,
    Query(query): Query<SpotListQuery>,
) -> AppResult<Json<Vec<SpotWithStatus>>> {
    lot::find_by_id(&state.pool, lot_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::LotNotFound))?;

    let spots = spot::find_by_lot(&state.pool, lot_id, query.available).await?;
    Ok(Json(spots))
}
