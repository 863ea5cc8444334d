//! Dashboard API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::models::ReservationWithDetails;

use crate::core::ServerState;
use crate::db::repository::{lot, reservation, spot, user};
use crate::utils::AppResult;

/// 全局占用概况
#[derive(Debug, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub total_lots: i64,
    pub total_spots: i64,
    pub occupied_spots: i64,
    pub available_spots: i64,
}

/// 管理端仪表盘：概况 + 用户/预约统计 + 最近预约
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminDashboard {
    #[serde(flatten)]
    pub summary: OccupancySummary,
    pub total_users: i64,
    pub open_reservations: i64,
    pub total_reservations: i64,
    /// 最近 10 条预约
    pub recent_reservations: Vec<ReservationWithDetails>,
}

async fn occupancy_summary(state: &ServerState) -> AppResult<OccupancySummary> {
    let total_lots = lot::count_all(&state.pool).await?;
    let total_spots = spot::count_all(&state.pool).await?;
    let occupied_spots = spot::count_occupied(&state.pool).await?;

    Ok(OccupancySummary {
        total_lots,
        total_spots,
        occupied_spots,
        available_spots: total_spots - occupied_spots,
    })
}

/// GET /api/dashboard - 占用概况 (所有登录用户)
pub async fn dashboard(State(state): State<ServerState>) -> AppResult<Json<OccupancySummary>> {
    Ok(Json(occupancy_summary(&state).await?))
}

/// GET /api/admin/dashboard - 全局统计 + 最近预约
pub async fn admin_dashboard(State(state): State<ServerState>) -> AppResult<Json<AdminDashboard>> {
    let summary = occupancy_summary(&state).await?;
    let total_users = user::count_non_admins(&state.pool).await?;
    let open_reservations = reservation::count_open(&state.pool).await?;
    let total_reservations = reservation::count_all(&state.pool).await?;
    let recent_reservations = reservation::find_recent(&state.pool, 10).await?;

    Ok(Json(AdminDashboard {
        summary,
        total_users,
        open_reservations,
        total_reservations,
        recent_reservations,
    }))
}
