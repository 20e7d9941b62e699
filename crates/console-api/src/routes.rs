//! Route table

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{applications, health, me, menus, profiles};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/health/database", get(health::database_check))
        // Applications
        .route("/applications", get(applications::list_all).post(applications::create))
        .route("/applications/mine", get(applications::list_mine))
        .route("/applications/{id}", put(applications::update).delete(applications::delete))
        .route("/applications/{id}/access", get(applications::access))
        // Profiles
        .route("/profiles", get(profiles::list_all).post(profiles::create))
        .route("/profiles/assign", post(profiles::assign))
        .route("/profiles/application/{id}", get(profiles::list_by_application))
        .route("/profiles/user/{id}", get(profiles::list_for_user))
        .route("/profiles/{id}", put(profiles::update).delete(profiles::delete))
        .route("/profiles/{id}/users/{user_id}", delete(profiles::remove_user))
        .route("/profiles/{id}/menus", get(profiles::list_menus).post(profiles::grant_menu))
        .route("/profiles/{id}/menus/{menu_id}", delete(profiles::revoke_menu))
        // Menus
        .route("/menus", post(menus::create))
        .route("/menus/user", get(menus::user_menu))
        .route("/menus/admin", get(menus::list_all))
        .route("/menus/application/{id}", get(menus::application_tree))
        .route("/menus/{id}", put(menus::update).delete(menus::delete))
        .route("/menus/{id}/children", get(menus::children))
        // Caller
        .route("/me/admin", get(me::admin_status));

    Router::new().nest("/api/v1", api).with_state(state)
}
