//! Health handlers

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::error;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

use super::ApiResult;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /api/v1/health
pub async fn health_check() -> ApiResult<HealthResponse> {
    Ok(Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })))
}

/// GET /api/v1/health/database
pub async fn database_check(State(state): State<AppState>) -> ApiResult<HealthResponse> {
    sqlx::query("SELECT 1").execute(&state.db).await.map_err(|e| {
        error!("Database health check failed: {}", e);
        ApiError::DatabaseError(e.to_string())
    })?;

    Ok(Json(ApiResponse::success(HealthResponse {
        status: "database reachable".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })))
}
