//! Health API Handler

use axum::{Json, extract::State};

use crate::core::ServerState;

/// GET /api/health - 健康检查 (公共)
pub async fn health(State(state): State<ServerState>) -> Json<serde_json::Value> {
    let db_ok = state.pool.acquire().await.is_ok();
    let status = if db_ok { "ok" } else { "degraded" };
    Json(serde_json::json!({
        "status": status,
        "db": db_ok
    }))
}
