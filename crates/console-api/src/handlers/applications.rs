// ============================================================================
// Console API - Application Handlers
// File: crates/console-api/src/handlers/applications.rs
// ============================================================================

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use console_core::domain::Application;

use crate::dto::{AccessResponse, ApplicationRequest, UpdateApplicationRequest};
use crate::error::ApiError;
use crate::extractors::{AdminContext, ApiPath, AuthContext, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/v1/applications/mine
pub async fn list_mine(State(state): State<AppState>, AuthContext(ctx): AuthContext) -> ApiResult<Vec<Application>> {
    let apps = state.applications.list_mine(&ctx).await?;
    Ok(Json(ApiResponse::success(apps)))
}

/// GET /api/v1/applications
pub async fn list_all(State(state): State<AppState>, AdminContext(ctx): AdminContext) -> ApiResult<Vec<Application>> {
    let apps = state.applications.list_all(&ctx).await?;
    Ok(Json(ApiResponse::success(apps)))
}

/// POST /api/v1/applications
pub async fn create(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ValidatedJson(payload): ValidatedJson<ApplicationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Application>>), ApiError> {
    let app = state.applications.create(&ctx, &payload.description).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(app))))
}

/// PUT /api/v1/applications/{id}
pub async fn update(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateApplicationRequest>,
) -> ApiResult<Application> {
    let app = state
        .applications
        .update(&ctx, id, payload.description.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(app)))
}

/// DELETE /api/v1/applications/{id}
pub async fn delete(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Uuid> {
    state.applications.delete(&ctx, id).await?;
    Ok(Json(ApiResponse::success(id)))
}

/// GET /api/v1/applications/{id}/access
pub async fn access(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<AccessResponse> {
    let has_access = state.access.has_application_access(&ctx, id).await;
    Ok(Json(ApiResponse::success(AccessResponse {
        application_id: id,
        has_access,
    })))
}
