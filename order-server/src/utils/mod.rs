//! 工具模块
//!
//! - 错误类型 (from shared::error)
//! - 日志初始化
//! - 业务时区时间

pub mod logger;
pub mod time;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
