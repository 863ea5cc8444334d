//! Parking Spot Repository
//!
//! `is_occupied` is always derived via EXISTS over open reservations.

use shared::models::SpotWithStatus;
use sqlx::SqlitePool;

use super::RepoResult;

const SPOT_WITH_STATUS_SELECT: &str = "SELECT s.id, s.lot_id, s.spot_number, s.created_at, \
     EXISTS(SELECT 1 FROM reservation r WHERE r.spot_id = s.id AND r.checkout_time IS NULL) AS is_occupied \
     FROM parking_spot s";

pub async fn find_by_lot(
    pool: &SqlitePool,
    lot_id: i64,
    only_available: bool,
) -> RepoResult<Vec<SpotWithStatus>> {
    let mut sql = format!("{SPOT_WITH_STATUS_SELECT} WHERE s.lot_id = ?");
    if only_available {
        sql.push_str(
            " AND NOT EXISTS(SELECT 1 FROM reservation r WHERE r.spot_id = s.id AND r.checkout_time IS NULL)",
        );
    }
    sql.push_str(" ORDER BY s.spot_number");

    let spots = sqlx::query_as::<_, SpotWithStatus>(&sql)
        .bind(lot_id)
        .fetch_all(pool)
        .await?;
    Ok(spots)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<SpotWithStatus>> {
    let sql = format!("{SPOT_WITH_STATUS_SELECT} WHERE s.id = ?");
    let spot = sqlx::query_as::<_, SpotWithStatus>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(spot)
}

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM parking_spot")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// 全系统被占用车位数 = 未结账预约数 (每个预约恰好占一个车位)
pub async fn count_occupied(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reservation WHERE checkout_time IS NULL",
    )
    .fetch_one(pool)
    .await?;
    Ok(count)
}
