// ============================================================================
// Console Infrastructure - PostgreSQL UserProfile Repository
// File: crates/console-infrastructure/src/database/postgres/user_profile_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use console_core::domain::{Profile, UserProfile};
use console_core::repositories::UserProfileRepository;
use console_core::{DomainError, SecurityContext, SecurityContextManager};
use console_shared::types::AuditFields;

use super::error::map_sqlx_error;
use super::profile_repo_impl::ProfileRow;
use super::store::PgPolicyStore;

pub struct PgUserProfileRepository {
    manager: SecurityContextManager<PgPolicyStore>,
}

impl PgUserProfileRepository {
    pub fn new(manager: SecurityContextManager<PgPolicyStore>) -> Self {
        Self { manager }
    }
}

#[derive(Debug, FromRow)]
struct UserProfileRow {
    id: Uuid,
    user_id: Uuid,
    idperfil: Uuid,
    fechacreacion: DateTime<Utc>,
    usuariocreacion: String,
    fechaactualizacion: Option<DateTime<Utc>>,
    usuarioactualizacion: Option<String>,
    estado: bool,
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        UserProfile {
            id: row.id,
            user_id: row.user_id,
            profile_id: row.idperfil,
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
impl UserProfileRepository for PgUserProfileRepository {
    async fn assign(&self, ctx: &SecurityContext, user_id: Uuid, profile_id: Uuid) -> Result<UserProfile, DomainError> {
        let row = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    let profile: Option<Uuid> =
                        sqlx::query_scalar("SELECT idperfil FROM perfil WHERE idperfil = $1 AND estado = true FOR SHARE")
                            .bind(profile_id)
                            .fetch_optional(&mut **tx)
                            .await
                            .map_err(|e| map_sqlx_error("loading profile", e))?;
                    if profile.is_none() {
                        return Err(DomainError::not_found("Profile", profile_id));
                    }

                    // An active row makes the conflict branch skip, so nothing comes back.
                    sqlx::query_as::<_, UserProfileRow>(
                        r#"
                        INSERT INTO usuario_perfil (user_id, idperfil)
                        VALUES ($1, $2)
                        ON CONFLICT (user_id, idperfil) DO UPDATE SET estado = true
                        WHERE usuario_perfil.estado = false
                        RETURNING
                            id, user_id, idperfil,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        "#,
                    )
                    .bind(user_id)
                    .bind(profile_id)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("assigning profile", e))?
                    .ok_or_else(|| {
                        DomainError::validation(format!("User {} already holds profile {}", user_id, profile_id))
                    })
                })
            })
            .await?;

        Ok(row.into())
    }

    async fn remove(&self, ctx: &SecurityContext, user_id: Uuid, profile_id: Uuid) -> Result<(), DomainError> {
        self.manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    let result = sqlx::query(
                        "UPDATE usuario_perfil SET estado = false WHERE user_id = $1 AND idperfil = $2 AND estado = true",
                    )
                    .bind(user_id)
                    .bind(profile_id)
                    .execute(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("removing profile assignment", e))?;

                    if result.rows_affected() == 0 {
                        return Err(DomainError::not_found("UserProfile", format!("{}/{}", user_id, profile_id)));
                    }
                    Ok(())
                })
            })
            .await
    }

    async fn profiles_for_user(&self, ctx: &SecurityContext, user_id: Uuid) -> Result<Vec<Profile>, DomainError> {
        let rows = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ProfileRow>(
                        r#"
                        SELECT
                            p.idperfil, p.idaplicacion, p.descripcion,
                            p.fechacreacion, p.usuariocreacion, p.fechaactualizacion, p.usuarioactualizacion,
                            p.estado
                        FROM perfil p
                        JOIN usuario_perfil up ON up.idperfil = p.idperfil
                        WHERE up.user_id = $1 AND up.estado = true AND p.estado = true
                        ORDER BY p.idaplicacion, p.descripcion
                        "#,
                    )
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("listing user profiles", e))
                })
            })
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
