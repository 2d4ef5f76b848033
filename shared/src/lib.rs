//! Shared types for the coffee order board
//!
//! Types used by both the order server and its API consumers:
//! error codes, response envelope, order / archive / menu models.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
