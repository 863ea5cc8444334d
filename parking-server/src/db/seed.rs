//! 启动种子数据
//!
//! 确保默认管理员账号存在，凭据来自 ADMIN_EMAIL / ADMIN_PASSWORD。

use sqlx::SqlitePool;

use crate::auth::hash_password;
use crate::core::Config;
use crate::db::repository::user;
use crate::utils::AppResult;

/// 启动时创建默认管理员 (已存在则跳过)
pub async fn ensure_default_admin(pool: &SqlitePool, config: &Config) -> AppResult<()> {
    if user::find_by_email(pool, &config.admin_email).await?.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(&config.admin_password)?;
    user::create_admin(pool, "Administrator", &config.admin_email, &password_hash).await?;

    tracing::info!("Default admin account created: {}", config.admin_email);
    Ok(())
}
