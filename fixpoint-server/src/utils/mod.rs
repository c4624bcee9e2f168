//! 工具模块

pub mod logger;
pub mod validation;

// Re-export the unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult};
