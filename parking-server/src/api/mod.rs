//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册/登录/当前用户
//! - [`lots`] - 停车场浏览和管理
//! - [`spots`] - 车位查询
//! - [`reservations`] - 预约/结账/历史
//! - [`users`] - 用户管理 (管理员)
//! - [`dashboard`] - 管理端仪表盘

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod lots;
pub mod reservations;
pub mod spots;
pub mod users;

use std::time::Duration;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// 组装完整路由
///
/// 认证由 [`require_auth`] 统一处理 (公共路径在中间件内部豁免)，
/// 管理员路由在各自模块内再叠加 `require_admin`。
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(lots::router())
        .merge(spots::router())
        .merge(reservations::router())
        .merge(users::router())
        .merge(dashboard::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(state.config.request_timeout_ms),
        ))
        .with_state(state)
}
