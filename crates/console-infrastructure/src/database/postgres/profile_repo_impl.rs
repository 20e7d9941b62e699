// ============================================================================
// Console Infrastructure - PostgreSQL Profile Repository
// File: crates/console-infrastructure/src/database/postgres/profile_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use console_core::domain::{Profile, ProfileChanges, ProfileDraft};
use console_core::repositories::ProfileRepository;
use console_core::{DomainError, SecurityContext, SecurityContextManager};
use console_shared::types::AuditFields;

use super::error::map_sqlx_error;
use super::store::PgPolicyStore;

pub struct PgProfileRepository {
    manager: SecurityContextManager<PgPolicyStore>,
}

impl PgProfileRepository {
    pub fn new(manager: SecurityContextManager<PgPolicyStore>) -> Self {
        Self { manager }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ProfileRow {
    idperfil: Uuid,
    idaplicacion: Uuid,
    descripcion: String,
    fechacreacion: DateTime<Utc>,
    usuariocreacion: String,
    fechaactualizacion: Option<DateTime<Utc>>,
    usuarioactualizacion: Option<String>,
    estado: bool,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.idperfil,
            application_id: row.idaplicacion,
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
impl ProfileRepository for PgProfileRepository {
    async fn create(&self, ctx: &SecurityContext, draft: ProfileDraft) -> Result<Profile, DomainError> {
        let row = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ProfileRow>(
                        r#"
                        INSERT INTO perfil (idaplicacion, descripcion)
                        VALUES ($1, $2)
                        RETURNING
                            idperfil, idaplicacion, descripcion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        "#,
                    )
                    .bind(draft.application_id)
                    .bind(&draft.description)
                    .fetch_one(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("creating profile", e))
                })
            })
            .await?;

        Ok(row.into())
    }

    async fn update(&self, ctx: &SecurityContext, id: Uuid, changes: ProfileChanges) -> Result<Profile, DomainError> {
        let row = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ProfileRow>(
                        r#"
                        UPDATE perfil
                        SET descripcion = $2
                        WHERE idperfil = $1 AND estado = true
                        RETURNING
                            idperfil, idaplicacion, descripcion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        "#,
                    )
                    .bind(id)
                    .bind(&changes.description)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("updating profile", e))?
                    .ok_or_else(|| DomainError::not_found("Profile", id))
                })
            })
            .await?;

        Ok(row.into())
    }

    async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError> {
        self.manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    let result = sqlx::query("UPDATE perfil SET estado = false WHERE idperfil = $1 AND estado = true")
                        .bind(id)
                        .execute(&mut **tx)
                        .await
                        .map_err(|e| map_sqlx_error("deleting profile", e))?;

                    if result.rows_affected() == 0 {
                        return Err(DomainError::not_found("Profile", id));
                    }
                    Ok(())
                })
            })
            .await
    }

    async fn find_by_id(&self, ctx: &SecurityContext, id: Uuid) -> Result<Option<Profile>, DomainError> {
        let row = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ProfileRow>(
                        r#"
                        SELECT
                            idperfil, idaplicacion, descripcion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM perfil
                        WHERE idperfil = $1 AND estado = true
                        "#,
                    )
                    .bind(id)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("finding profile", e))
                })
            })
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_application(&self, ctx: &SecurityContext, application_id: Uuid) -> Result<Vec<Profile>, DomainError> {
        let rows = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ProfileRow>(
                        r#"
                        SELECT
                            idperfil, idaplicacion, descripcion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM perfil
                        WHERE idaplicacion = $1 AND estado = true
                        ORDER BY descripcion
                        "#,
                    )
                    .bind(application_id)
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("listing profiles", e))
                })
            })
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self, ctx: &SecurityContext) -> Result<Vec<Profile>, DomainError> {
        let rows = self
            .manager
            .run_with_context(ctx, |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ProfileRow>(
                        r#"
                        SELECT
                            idperfil, idaplicacion, descripcion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM perfil
                        WHERE estado = true
                        ORDER BY idaplicacion, descripcion
                        "#,
                    )
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("listing all profiles", e))
                })
            })
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
