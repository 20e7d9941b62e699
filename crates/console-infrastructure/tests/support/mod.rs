//! Shared Postgres fixture for the repository tests.

use std::env;
use std::sync::Arc;

use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use console_core::{SecurityContext, SecurityContextManager};
use console_infrastructure::{run_migrations, PgPolicyStore};
use console_security::Principal;

pub struct TestDatabase {
    pub pool: PgPool,
    pub manager: SecurityContextManager<PgPolicyStore>,
}

impl TestDatabase {
    /// `None` when `CONSOLE_TEST_DATABASE_URL` is unset, so the suite skips
    /// instead of failing on machines without Postgres.
    pub async fn setup() -> Option<Self> {
        let Ok(url) = env::var("CONSOLE_TEST_DATABASE_URL") else {
            eprintln!("Skipping repository tests: set CONSOLE_TEST_DATABASE_URL to run them.");
            return None;
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .expect("connect to test database");
        run_migrations(&pool).await.expect("apply migrations");

        let manager = SecurityContextManager::new(Arc::new(PgPolicyStore::new(pool.clone())));
        Some(Self { pool, manager })
    }
}

pub fn admin() -> SecurityContext {
    let principal = Principal {
        id: Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        role: "admin".to_string(),
    };
    SecurityContext::new(principal, format!("token-{}", Uuid::new_v4())).expect("security context")
}

/// Reads `estado` straight from the table, bypassing the repositories.
pub async fn is_active(pool: &PgPool, table: &str, key: &str, id: Uuid) -> bool {
    sqlx::query_scalar(&format!("SELECT estado FROM {} WHERE {} = $1", table, key))
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("row exists")
}
