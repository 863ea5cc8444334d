//! 工具模块 - 日志和输入校验
//!
//! # 内容
//!
//! - [`AppError`] / [`ApiResponse`] - 统一错误和响应类型 (from shared::error)
//! - [`logger`] - tracing 日志初始化
//! - [`validation`] - 输入校验辅助函数

pub mod logger;
pub mod validation;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
