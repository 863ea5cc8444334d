//! User Repository

use shared::models::{User, UserCreate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const USER_SELECT: &str =
    "SELECT id, name, address, phone, email, password_hash, is_admin, created_at FROM user";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE email = ? LIMIT 1");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// 注册新用户 (非管理员)
pub async fn create(pool: &SqlitePool, data: &UserCreate, password_hash: &str) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO user (name, address, phone, email, password_hash, is_admin, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// 创建管理员账号 (仅用于启动种子)
pub async fn create_admin(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO user (name, address, phone, email, password_hash, is_admin, created_at) \
         VALUES (?1, '', '', ?2, ?3, 1, ?4) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create admin".into()))
}

/// 所有非管理员用户，按注册时间倒序
pub async fn find_non_admins(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let sql = format!("{USER_SELECT} WHERE is_admin = 0 ORDER BY created_at DESC");
    let users = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;
    Ok(users)
}

pub async fn count_non_admins(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user WHERE is_admin = 0")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// 删除用户；级联删除其预约记录 (未结账的预约随之释放车位)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM user WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
