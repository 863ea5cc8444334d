//! 仪表盘 API 模块
//!
//! 用户侧返回全局占用概况；管理侧额外带用户/预约统计和最近记录。

mod handler;

pub use handler::{AdminDashboard, OccupancySummary};

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/api/admin/dashboard", get(handler::admin_dashboard))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/api/dashboard", get(handler::dashboard))
        .merge(admin_routes)
}
