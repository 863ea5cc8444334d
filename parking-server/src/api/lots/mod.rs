//! 停车场 API 模块
//!
//! 普通用户只读；增删改挂在 /api/admin/lots 下并要求管理员。

mod handler;

pub use handler::LotDetail;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let user_routes = Router::new().route("/api/lots", get(handler::list));

    let admin_routes = Router::new()
        .route("/", get(handler::admin_list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin));

    user_routes.nest("/api/admin/lots", admin_routes)
}
