//! 预约 API 模块
//!
//! 用户侧：预约、当前预约、结账、历史。
//! 管理侧：分页列表、强制结束，挂在 /api/admin/reservations。

mod handler;

pub use handler::{CheckoutResponse, PageResponse, ReservationView};

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/", post(handler::create))
        .route("/current", get(handler::current))
        .route("/history", get(handler::history))
        .route("/{id}/checkout", post(handler::checkout));

    let admin_routes = Router::new()
        .route("/", get(handler::admin_list))
        .route("/{id}/cancel", post(handler::admin_cancel))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .nest("/api/reservations", user_routes)
        .nest("/api/admin/reservations", admin_routes)
}
