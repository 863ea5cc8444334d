//! Parking Lot Repository
//!
//! Lot creation and capacity growth provision spot rows inside a single
//! transaction so a half-provisioned lot is never visible.

use shared::models::{LotCreate, LotUpdate, LotWithAvailability, ParkingLot, spot_label};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const LOT_SELECT: &str = "SELECT id, name, location, total_spots, created_at FROM parking_lot";

/// 可用车位数 = 总车位 - 未结账预约数
const LOT_WITH_AVAILABILITY_SELECT: &str = "SELECT l.id, l.name, l.location, l.total_spots, l.created_at, \
     l.total_spots - (SELECT COUNT(*) FROM reservation r \
        JOIN parking_spot s ON r.spot_id = s.id \
        WHERE s.lot_id = l.id AND r.checkout_time IS NULL) AS available_spots \
     FROM parking_lot l";

pub async fn find_all_with_availability(
    pool: &SqlitePool,
) -> RepoResult<Vec<LotWithAvailability>> {
    let sql = format!("{LOT_WITH_AVAILABILITY_SELECT} ORDER BY l.name");
    let lots = sqlx::query_as::<_, LotWithAvailability>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(lots)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ParkingLot>> {
    let sql = format!("{LOT_SELECT} WHERE id = ?");
    let lot = sqlx::query_as::<_, ParkingLot>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(lot)
}

pub async fn find_by_id_with_availability(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<LotWithAvailability>> {
    let sql = format!("{LOT_WITH_AVAILABILITY_SELECT} WHERE l.id = ?");
    let lot = sqlx::query_as::<_, LotWithAvailability>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(lot)
}

/// 创建停车场并在同一事务内生成所有车位
///
/// 车位编号: 场名前三字符大写 + 三位序号 ("Lakeview" → LAK-001..)
pub async fn create(pool: &SqlitePool, data: LotCreate) -> RepoResult<ParkingLot> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let lot_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO parking_lot (name, location, total_spots, created_at) \
         VALUES (?1, ?2, ?3, ?4) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.location)
    .bind(data.total_spots)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for index in 1..=data.total_spots {
        sqlx::query("INSERT INTO parking_spot (lot_id, spot_number, created_at) VALUES (?1, ?2, ?3)")
            .bind(lot_id)
            .bind(spot_label(&data.name, index))
            .bind(now)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    find_by_id(pool, lot_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create parking lot".into()))
}

/// 更新停车场；容量只增不减
///
/// 容量增长追加新车位，编号接续在现有车位之后，前缀取更新后的场名。
pub async fn update(pool: &SqlitePool, id: i64, data: LotUpdate) -> RepoResult<ParkingLot> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let current = sqlx::query_as::<_, ParkingLot>(&format!("{LOT_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Parking lot {id} not found")))?;

    if let Some(new_total) = data.total_spots
        && new_total < current.total_spots
    {
        return Err(RepoError::Validation(format!(
            "total_spots cannot be reduced ({} -> {new_total})",
            current.total_spots
        )));
    }

    sqlx::query(
        "UPDATE parking_lot SET name = COALESCE(?1, name), location = COALESCE(?2, location), \
         total_spots = COALESCE(?3, total_spots) WHERE id = ?4",
    )
    .bind(&data.name)
    .bind(&data.location)
    .bind(data.total_spots)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if let Some(new_total) = data.total_spots
        && new_total > current.total_spots
    {
        let lot_name = data.name.as_deref().unwrap_or(&current.name);
        for index in (current.total_spots + 1)..=new_total {
            sqlx::query(
                "INSERT INTO parking_spot (lot_id, spot_number, created_at) VALUES (?1, ?2, ?3)",
            )
            .bind(id)
            .bind(spot_label(lot_name, index))
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Parking lot {id} not found")))
}

/// 该场内被占用 (存在未结账预约) 的车位数
pub async fn count_occupied(pool: &SqlitePool, lot_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reservation r \
         JOIN parking_spot s ON r.spot_id = s.id \
         WHERE s.lot_id = ? AND r.checkout_time IS NULL",
    )
    .bind(lot_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// 删除停车场；车位和历史预约一并级联删除
///
/// 占用判断与删除在同一条语句内完成，避免检查和删除之间插入新预约。
/// 存在未结账预约时不删除，返回 false。
pub async fn delete_if_unoccupied(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM parking_lot WHERE id = ?1 AND NOT EXISTS (\
             SELECT 1 FROM reservation r \
             JOIN parking_spot s ON r.spot_id = s.id \
             WHERE s.lot_id = ?1 AND r.checkout_time IS NULL)",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM parking_lot")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
