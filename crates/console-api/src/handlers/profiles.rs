// ============================================================================
// Console API - Profile Handlers
// File: crates/console-api/src/handlers/profiles.rs
// ============================================================================

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use console_core::domain::{Profile, ProfileMenu, UserProfile};

use crate::dto::{AssignProfileRequest, CreateProfileRequest, GrantMenuRequest, UpdateProfileRequest};
use crate::error::ApiError;
use crate::extractors::{AdminContext, ApiPath, AuthContext, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/v1/profiles/application/{id}
pub async fn list_by_application(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ApiPath(application_id): ApiPath<Uuid>,
) -> ApiResult<Vec<Profile>> {
    let profiles = state.profiles.list_by_application(&ctx, application_id).await?;
    Ok(Json(ApiResponse::success(profiles)))
}

/// GET /api/v1/profiles
pub async fn list_all(State(state): State<AppState>, AdminContext(ctx): AdminContext) -> ApiResult<Vec<Profile>> {
    let profiles = state.profiles.list_all(&ctx).await?;
    Ok(Json(ApiResponse::success(profiles)))
}

/// POST /api/v1/profiles
pub async fn create(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ValidatedJson(payload): ValidatedJson<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Profile>>), ApiError> {
    let profile = state
        .profiles
        .create(&ctx, payload.application_id, &payload.description)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(profile))))
}

/// PUT /api/v1/profiles/{id}
pub async fn update(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Profile> {
    let profile = state.profiles.update(&ctx, id, payload.description.as_deref()).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// DELETE /api/v1/profiles/{id}
pub async fn delete(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Uuid> {
    state.profiles.delete(&ctx, id).await?;
    Ok(Json(ApiResponse::success(id)))
}

/// POST /api/v1/profiles/assign
pub async fn assign(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ValidatedJson(payload): ValidatedJson<AssignProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), ApiError> {
    let assignment = state
        .profiles
        .assign_user(&ctx, payload.profile_id, payload.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(assignment))))
}

/// DELETE /api/v1/profiles/{id}/users/{user_id}
pub async fn remove_user(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ApiPath((profile_id, user_id)): ApiPath<(Uuid, Uuid)>,
) -> ApiResult<Uuid> {
    state.profiles.remove_user(&ctx, profile_id, user_id).await?;
    Ok(Json(ApiResponse::success(user_id)))
}

/// GET /api/v1/profiles/user/{user_id}
pub async fn list_for_user(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ApiPath(user_id): ApiPath<Uuid>,
) -> ApiResult<Vec<Profile>> {
    let profiles = state.profiles.profiles_for_user(&ctx, user_id).await?;
    Ok(Json(ApiResponse::success(profiles)))
}

/// GET /api/v1/profiles/{id}/menus
pub async fn list_menus(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ApiPath(profile_id): ApiPath<Uuid>,
) -> ApiResult<Vec<ProfileMenu>> {
    let grants = state.profiles.menus_of_profile(&ctx, profile_id).await?;
    Ok(Json(ApiResponse::success(grants)))
}

/// POST /api/v1/profiles/{id}/menus
pub async fn grant_menu(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ApiPath(profile_id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<GrantMenuRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProfileMenu>>), ApiError> {
    let grant = state.profiles.grant_menu(&ctx, profile_id, payload.menu_id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(grant))))
}

/// DELETE /api/v1/profiles/{id}/menus/{menu_id}
pub async fn revoke_menu(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ApiPath((profile_id, menu_id)): ApiPath<(Uuid, Uuid)>,
) -> ApiResult<Uuid> {
    state.profiles.revoke_menu(&ctx, profile_id, menu_id).await?;
    Ok(Json(ApiResponse::success(menu_id)))
}
