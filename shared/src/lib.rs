//! Shared types for the parking reservation service
//!
//! - [`error`] - 统一错误系统 (`ErrorCode` / `AppError` / `ApiResponse`)
//! - [`models`] - 数据模型 (用户、停车场、车位、预约)
//! - [`util`] - 时间戳等小工具

pub mod error;
pub mod models;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
