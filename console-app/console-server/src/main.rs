use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method, StatusCode};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use console_api::AppState;
use console_core::{ApplicationService, AuthorizationResolver, MenuService, ProfileService, SecurityContextManager};
use console_infrastructure::{
    create_pool, run_migrations, PgApplicationRepository, PgMenuRepository, PgPolicyStore, PgProfileMenuRepository,
    PgProfileRepository, PgUserProfileRepository,
};
use console_security::TokenVerifier;
use console_shared::config::AppConfig;
use console_shared::{telemetry, AppError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry; the guard flushes logs on exit
    let _guard = telemetry::init_telemetry()?;

    let config = AppConfig::load()?;
    info!("{} starting ({})", config.app.name, config.app.env);

    // Connect to Database
    let pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }

    // Store -> context manager -> repositories -> services
    let store = Arc::new(PgPolicyStore::new(pool.clone()));
    let manager = SecurityContextManager::new(store);

    let applications = Arc::new(PgApplicationRepository::new(manager.clone()));
    let profiles = Arc::new(PgProfileRepository::new(manager.clone()));
    let menus = Arc::new(PgMenuRepository::new(manager.clone()));
    let grants = Arc::new(PgProfileMenuRepository::new(manager.clone()));
    let assignments = Arc::new(PgUserProfileRepository::new(manager.clone()));

    let state = AppState {
        db: pool,
        verifier: Arc::new(TokenVerifier::from_settings(&config.jwt)),
        access: Arc::new(AuthorizationResolver::new(manager)),
        applications: Arc::new(ApplicationService::new(applications)),
        profiles: Arc::new(ProfileService::new(profiles, grants, assignments)),
        menus: Arc::new(MenuService::new(menus)),
    };

    // A timed-out request drops its handler future, which rolls back its transaction.
    let app = console_api::router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.app.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(&config.cors.allowed_origins)?);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// No configured origins means no cross-origin access at all.
fn cors_layer(origins: &[String]) -> Result<CorsLayer, AppError> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() {
        return Ok(layer);
    }

    let allowed = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::InvalidSetting(format!("cors.allowed_origins: {}", origin)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(allowed)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
