use axum::{extract::State, Json};

use crate::dto::AdminStatusResponse;
use crate::extractors::AuthContext;
use crate::response::ApiResponse;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/v1/me/admin
pub async fn admin_status(State(state): State<AppState>, AuthContext(ctx): AuthContext) -> ApiResult<AdminStatusResponse> {
    let is_admin = state.access.is_administrator(&ctx).await;
    Ok(Json(ApiResponse::success(AdminStatusResponse { is_admin })))
}
