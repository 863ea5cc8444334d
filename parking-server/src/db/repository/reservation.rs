//! Reservation Repository
//!
//! The partial unique indexes on reservation(user_id) / reservation(spot_id)
//! WHERE checkout_time IS NULL close the reserve race: the losing writer gets
//! a unique violation which surfaces as [`RepoError::Duplicate`].

use shared::models::{Reservation, ReservationWithDetails};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const RESERVATION_SELECT: &str =
    "SELECT id, user_id, spot_id, vehicle_number, checkin_time, checkout_time FROM reservation";

const DETAILS_SELECT: &str = "SELECT r.id, r.user_id, u.name AS user_name, r.spot_id, s.spot_number, l.name AS lot_name, \
     r.vehicle_number, r.checkin_time, r.checkout_time \
     FROM reservation r \
     JOIN user u ON r.user_id = u.id \
     JOIN parking_spot s ON r.spot_id = s.id \
     JOIN parking_lot l ON s.lot_id = l.id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE id = ?");
    let reservation = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(reservation)
}

pub async fn find_details_by_id(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<ReservationWithDetails>> {
    let sql = format!("{DETAILS_SELECT} WHERE r.id = ?");
    let details = sqlx::query_as::<_, ReservationWithDetails>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(details)
}

/// 用户当前未结账的预约 (最多一条)
pub async fn find_open_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE user_id = ? AND checkout_time IS NULL");
    let reservation = sqlx::query_as::<_, Reservation>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(reservation)
}

/// 车位当前未结账的预约 (最多一条)
pub async fn find_open_by_spot(pool: &SqlitePool, spot_id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE spot_id = ? AND checkout_time IS NULL");
    let reservation = sqlx::query_as::<_, Reservation>(&sql)
        .bind(spot_id)
        .fetch_optional(pool)
        .await?;
    Ok(reservation)
}

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    spot_id: i64,
    vehicle_number: &str,
) -> RepoResult<Reservation> {
    let now = shared::util::now_millis();
    let reservation = sqlx::query_as::<_, Reservation>(
        "INSERT INTO reservation (user_id, spot_id, vehicle_number, checkin_time) \
         VALUES (?1, ?2, ?3, ?4) \
         RETURNING id, user_id, spot_id, vehicle_number, checkin_time, checkout_time",
    )
    .bind(user_id)
    .bind(spot_id)
    .bind(vehicle_number)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(reservation)
}

/// 结账：写入 checkout_time，仅对未结账的预约生效
pub async fn close(pool: &SqlitePool, id: i64, checkout_ms: i64) -> RepoResult<Reservation> {
    let rows = sqlx::query(
        "UPDATE reservation SET checkout_time = ?1 WHERE id = ?2 AND checkout_time IS NULL",
    )
    .bind(checkout_ms)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Open reservation {id} not found"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

/// 用户的全部预约 (含未结账)，按入场时间倒序
pub async fn history_by_user(
    pool: &SqlitePool,
    user_id: i64,
) -> RepoResult<Vec<ReservationWithDetails>> {
    let sql = format!("{DETAILS_SELECT} WHERE r.user_id = ? ORDER BY r.checkin_time DESC");
    let rows = sqlx::query_as::<_, ReservationWithDetails>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// 分页列出所有预约，按入场时间倒序
pub async fn find_page(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<ReservationWithDetails>> {
    let sql = format!("{DETAILS_SELECT} ORDER BY r.checkin_time DESC LIMIT ? OFFSET ?");
    let rows = sqlx::query_as::<_, ReservationWithDetails>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reservation")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_open(pool: &SqlitePool) -> RepoResult<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reservation WHERE checkout_time IS NULL")
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// 最近 `limit` 条预约 (管理端仪表盘)
pub async fn find_recent(
    pool: &SqlitePool,
    limit: i64,
) -> RepoResult<Vec<ReservationWithDetails>> {
    let sql = format!("{DETAILS_SELECT} ORDER BY r.checkin_time DESC LIMIT ?");
    let rows = sqlx::query_as::<_, ReservationWithDetails>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
