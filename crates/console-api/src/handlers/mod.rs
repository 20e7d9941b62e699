//! HTTP handlers

pub mod applications;
pub mod health;
pub mod me;
pub mod menus;
pub mod profiles;

/// Result type shared by every handler.
pub type ApiResult<T> = Result<axum::Json<crate::response::ApiResponse<T>>, crate::error::ApiError>;
