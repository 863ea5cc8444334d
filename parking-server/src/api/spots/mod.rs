//! 车位 API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/lots/{lot_id}/spots", get(handler::list_by_lot))
}
