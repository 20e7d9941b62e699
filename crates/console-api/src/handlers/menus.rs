// ============================================================================
// Console API - Menu Handlers
// File: crates/console-api/src/handlers/menus.rs
// ============================================================================

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use console_core::domain::{Menu, MenuChanges, MenuDraft, MenuNode};

use crate::dto::{CreateMenuRequest, UpdateMenuRequest, UserMenuQuery};
use crate::error::ApiError;
use crate::extractors::{AdminContext, ApiPath, ApiQuery, AuthContext, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/v1/menus/user?app_id=
pub async fn user_menu(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ApiQuery(query): ApiQuery<UserMenuQuery>,
) -> ApiResult<Vec<MenuNode>> {
    let tree = state.menus.user_menu(&ctx, query.app_id).await?;
    Ok(Json(ApiResponse::success(tree)))
}

/// GET /api/v1/menus/admin
pub async fn list_all(State(state): State<AppState>, AdminContext(ctx): AdminContext) -> ApiResult<Vec<Menu>> {
    let menus = state.menus.list_all(&ctx).await?;
    Ok(Json(ApiResponse::success(menus)))
}

/// GET /api/v1/menus/application/{id}
pub async fn application_tree(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ApiPath(application_id): ApiPath<Uuid>,
) -> ApiResult<Vec<MenuNode>> {
    let tree = state.menus.application_tree(&ctx, application_id).await?;
    Ok(Json(ApiResponse::success(tree)))
}

/// GET /api/v1/menus/{id}/children
pub async fn children(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ApiPath(parent_id): ApiPath<Uuid>,
) -> ApiResult<Vec<Menu>> {
    let menus = state.menus.children(&ctx, parent_id).await?;
    Ok(Json(ApiResponse::success(menus)))
}

/// POST /api/v1/menus
pub async fn create(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ValidatedJson(payload): ValidatedJson<CreateMenuRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Menu>>), ApiError> {
    let draft = MenuDraft::new(
        payload.application_id,
        &payload.description,
        payload.parent_menu_id,
        payload.icon.as_deref(),
        payload.path.as_deref(),
    )?;
    let menu = state.menus.create(&ctx, draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(menu))))
}

/// PUT /api/v1/menus/{id}
pub async fn update(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateMenuRequest>,
) -> ApiResult<Menu> {
    let changes = MenuChanges::new(
        payload.description.as_deref(),
        payload.parent_change(),
        payload.icon.as_deref(),
        payload.path.as_deref(),
    )?;
    let menu = state.menus.update(&ctx, id, changes).await?;
    Ok(Json(ApiResponse::success(menu)))
}

/// DELETE /api/v1/menus/{id}
pub async fn delete(
    State(state): State<AppState>,
    AdminContext(ctx): AdminContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Uuid> {
    state.menus.delete(&ctx, id).await?;
    Ok(Json(ApiResponse::success(id)))
}
