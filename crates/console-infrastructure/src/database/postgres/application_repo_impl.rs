// ============================================================================
// Console Infrastructure - PostgreSQL Application Repository
// File: crates/console-infrastructure/src/database/postgres/application_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::debug;
use uuid::Uuid;

use console_core::domain::{Application, ApplicationDraft};
use console_core::repositories::ApplicationRepository;
use console_core::{DomainError, SecurityContext, SecurityContextManager};
use console_shared::types::AuditFields;

use super::error::map_sqlx_error;
use super::store::PgPolicyStore;

pub struct PgApplicationRepository {
    manager: SecurityContextManager<PgPolicyStore>,
}

impl PgApplicationRepository {
    pub fn new(manager: SecurityContextManager<PgPolicyStore>) -> Self {
        Self { manager }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct ApplicationRow {
    idaplicacion: Uuid,
    descripcion: String,
    fechacreacion: DateTime<Utc>,
    usuariocreacion: String,
    fechaactualizacion: Option<DateTime<Utc>>,
    usuarioactualizacion: Option<String>,
    estado: bool,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Application {
            id: row.idaplicacion,
            description: row.descripcion,
            audit: AuditFields {
                created_at: row.fechacreacion,
                created_by: row.usuariocreacion,
                updated_at: row.fechaactualizacion,
                updated_by: row.usuarioactualizacion,
            },
            active: row.estado,
        }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn create(&self, ctx: &SecurityContext, draft: ApplicationDraft) -> Result<Application, DomainError> {
        let row = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ApplicationRow>(
                        r#"
                        INSERT INTO aplicacion (descripcion)
                        VALUES ($1)
                        RETURNING
                            idaplicacion, descripcion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        "#,
                    )
                    .bind(&draft.description)
                    .fetch_one(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("creating application", e))
                })
            })
            .await?;

        Ok(row.into())
    }

    async fn update(&self, ctx: &SecurityContext, id: Uuid, draft: ApplicationDraft) -> Result<Application, DomainError> {
        let row = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ApplicationRow>(
                        r#"
                        UPDATE aplicacion
                        SET descripcion = $2
                        WHERE idaplicacion = $1 AND estado = true
                        RETURNING
                            idaplicacion, descripcion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        "#,
                    )
                    .bind(id)
                    .bind(&draft.description)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("updating application", e))?
                    .ok_or_else(|| DomainError::not_found("Application", id))
                })
            })
            .await?;

        Ok(row.into())
    }

    async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError> {
        self.manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    let result = sqlx::query("UPDATE aplicacion SET estado = false WHERE idaplicacion = $1 AND estado = true")
                        .bind(id)
                        .execute(&mut **tx)
                        .await
                        .map_err(|e| map_sqlx_error("deleting application", e))?;

                    if result.rows_affected() == 0 {
                        return Err(DomainError::not_found("Application", id));
                    }
                    Ok(())
                })
            })
            .await
    }

    async fn find_by_id(&self, ctx: &SecurityContext, id: Uuid) -> Result<Option<Application>, DomainError> {
        let row = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ApplicationRow>(
                        r#"
                        SELECT
                            idaplicacion, descripcion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM aplicacion
                        WHERE idaplicacion = $1 AND estado = true
                        "#,
                    )
                    .bind(id)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("finding application", e))
                })
            })
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_visible(&self, ctx: &SecurityContext) -> Result<Vec<Application>, DomainError> {
        let rows = self
            .manager
            .run_with_context(ctx, |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ApplicationRow>(
                        r#"
                        SELECT
                            idaplicacion, descripcion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM aplicacion
                        WHERE estado = true
                        ORDER BY descripcion
                        "#,
                    )
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("listing applications", e))
                })
            })
            .await?;

        debug!("Loaded {} visible applications", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self, ctx: &SecurityContext) -> Result<Vec<Application>, DomainError> {
        let rows = self
            .manager
            .run_with_context(ctx, |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ApplicationRow>(
                        r#"
                        SELECT
                            idaplicacion, descripcion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM aplicacion
                        ORDER BY estado DESC, descripcion
                        "#,
                    )
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("listing all applications", e))
                })
            })
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
