use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use console_core::{AccessResolver, ApplicationService, MenuService, ProfileService};
use console_security::TokenVerifier;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub verifier: Arc<TokenVerifier>,
    pub access: Arc<dyn AccessResolver>,
    pub applications: Arc<ApplicationService>,
    pub profiles: Arc<ProfileService>,
    pub menus: Arc<MenuService>,
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.verifier)
    }
}
