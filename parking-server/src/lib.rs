//! Parking Server - 停车位预约管理系统
//!
//! # 模块结构
//!
//! ```text
//! parking-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、Argon2 密码
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # SQLite 连接池、迁移、仓库
//! └── utils/         # 日志、输入校验
//! ```
//!
//! 车位占用状态不落盘：车位被占用当且仅当存在一条未结账的预约。

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
