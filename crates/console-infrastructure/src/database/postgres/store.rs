// ============================================================================
// Console Infrastructure - PostgreSQL Policy Store
// File: crates/console-infrastructure/src/database/postgres/store.rs
// ============================================================================
//! Transactions whose session state carries the caller's claims, plus the
//! store-side policy functions `fn_acceso_app` and `fn_es_admin`.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, error};
use uuid::Uuid;

use console_core::context::{IdentityBinder, PolicyFunctions, TransactionalStore};
use console_core::DomainError;
use console_security::Principal;
use console_shared::constants::CLAIMS_SETTING;

use super::error::map_sqlx_error;

#[derive(Clone)]
pub struct PgPolicyStore {
    pool: PgPool,
}

impl PgPolicyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TransactionalStore for PgPolicyStore {
    type Tx = Transaction<'static, Postgres>;

    async fn begin(&self) -> Result<Self::Tx, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("opening transaction", e))
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), DomainError> {
        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("committing transaction", e))
    }

    async fn rollback(&self, tx: Self::Tx) -> Result<(), DomainError> {
        tx.rollback()
            .await
            .map_err(|e| map_sqlx_error("rolling back transaction", e))
    }
}

#[async_trait]
impl IdentityBinder for PgPolicyStore {
    async fn bind_identity(&self, tx: &mut Self::Tx, principal: &Principal) -> Result<(), DomainError> {
        let claims = principal.session_claims().to_string();

        // Third argument `true` scopes the setting to this transaction.
        sqlx::query("SELECT set_config($1, $2, true)")
            .bind(CLAIMS_SETTING)
            .bind(claims)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                error!("set_config({}) failed: {}", CLAIMS_SETTING, e);
                DomainError::ContextBinding(e.to_string())
            })?;

        debug!("Claims bound for user {}", principal.id);
        Ok(())
    }
}

#[async_trait]
impl PolicyFunctions for PgPolicyStore {
    async fn application_access(&self, tx: &mut Self::Tx, application_id: Uuid) -> Result<Option<bool>, DomainError> {
        let granted: Option<Option<bool>> = sqlx::query_scalar("SELECT public.fn_acceso_app($1)")
            .bind(application_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error("calling fn_acceso_app", e))?;

        Ok(granted.flatten())
    }

    async fn administrator(&self, tx: &mut Self::Tx) -> Result<Option<bool>, DomainError> {
        let admin: Option<Option<bool>> = sqlx::query_scalar("SELECT public.fn_es_admin()")
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error("calling fn_es_admin", e))?;

        Ok(admin.flatten())
    }
}
