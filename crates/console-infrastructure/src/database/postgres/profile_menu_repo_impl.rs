// ============================================================================
// Console Infrastructure - PostgreSQL ProfileMenu Repository
// File: crates/console-infrastructure/src/database/postgres/profile_menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use console_core::domain::{Menu, Profile, ProfileMenu, ProfileMenuDraft};
use console_core::repositories::ProfileMenuRepository;
use console_core::{DomainError, SecurityContext, SecurityContextManager};
use console_shared::types::AuditFields;

use super::error::map_sqlx_error;
use super::menu_repo_impl::MenuRow;
use super::profile_repo_impl::ProfileRow;
use super::store::PgPolicyStore;

pub struct PgProfileMenuRepository {
    manager: SecurityContextManager<PgPolicyStore>,
}

impl PgProfileMenuRepository {
    pub fn new(manager: SecurityContextManager<PgPolicyStore>) -> Self {
        Self { manager }
    }
}

#[derive(Debug, FromRow)]
struct ProfileMenuRow {
    idperfilmenu: Uuid,
    idperfil: Uuid,
    idmenu: Uuid,
    idaplicacion: Uuid,
    fechacreacion: DateTime<Utc>,
    usuariocreacion: String,
    fechaactualizacion: Option<DateTime<Utc>>,
    usuarioactualizacion: Option<String>,
    estado: bool,
}

impl From<ProfileMenuRow> for ProfileMenu {
    fn from(row: ProfileMenuRow) -> Self {
        ProfileMenu {
            id: row.idperfilmenu,
            profile_id: row.idperfil,
            menu_id: row.idmenu,
            application_id: row.idaplicacion,
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
impl ProfileMenuRepository for PgProfileMenuRepository {
    async fn grant(&self, ctx: &SecurityContext, profile_id: Uuid, menu_id: Uuid) -> Result<ProfileMenu, DomainError> {
        let row = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    let profile: Profile = sqlx::query_as::<_, ProfileRow>(
                        r#"
                        SELECT
                            idperfil, idaplicacion, descripcion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM perfil
                        WHERE idperfil = $1 AND estado = true
                        FOR SHARE
                        "#,
                    )
                    .bind(profile_id)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("loading profile", e))?
                    .ok_or_else(|| DomainError::not_found("Profile", profile_id))?
                    .into();

                    let menu: Menu = sqlx::query_as::<_, MenuRow>(
                        r#"
                        SELECT
                            idmenu, idaplicacion, descripcion, menupadre, icono, path,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM menu
                        WHERE idmenu = $1 AND estado = true
                        FOR SHARE
                        "#,
                    )
                    .bind(menu_id)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("loading menu", e))?
                    .ok_or_else(|| DomainError::not_found("Menu", menu_id))?
                    .into();

                    let draft = ProfileMenuDraft::link(&profile, &menu)?;

                    // An active grant makes the conflict branch skip, so nothing comes back.
                    sqlx::query_as::<_, ProfileMenuRow>(
                        r#"
                        INSERT INTO perfilmenu (idperfil, idmenu, idaplicacion)
                        VALUES ($1, $2, $3)
                        ON CONFLICT (idperfil, idmenu) DO UPDATE SET estado = true
                        WHERE perfilmenu.estado = false
                        RETURNING
                            idperfilmenu, idperfil, idmenu, idaplicacion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        "#,
                    )
                    .bind(draft.profile_id)
                    .bind(draft.menu_id)
                    .bind(draft.application_id)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("granting menu", e))?
                    .ok_or_else(|| {
                        DomainError::validation(format!("Menu {} is already granted to profile {}", menu_id, profile_id))
                    })
                })
            })
            .await?;

        Ok(row.into())
    }

    async fn revoke(&self, ctx: &SecurityContext, profile_id: Uuid, menu_id: Uuid) -> Result<(), DomainError> {
        self.manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    let result = sqlx::query(
                        "UPDATE perfilmenu SET estado = false WHERE idperfil = $1 AND idmenu = $2 AND estado = true",
                    )
                    .bind(profile_id)
                    .bind(menu_id)
                    .execute(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("revoking menu", e))?;

                    if result.rows_affected() == 0 {
                        return Err(DomainError::not_found("ProfileMenu", format!("{}/{}", profile_id, menu_id)));
                    }
                    Ok(())
                })
            })
            .await
    }

    async fn list_by_profile(&self, ctx: &SecurityContext, profile_id: Uuid) -> Result<Vec<ProfileMenu>, DomainError> {
        let rows = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, ProfileMenuRow>(
                        r#"
                        SELECT
                            idperfilmenu, idperfil, idmenu, idaplicacion,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM perfilmenu
                        WHERE idperfil = $1 AND estado = true
                        ORDER BY fechacreacion
                        "#,
                    )
                    .bind(profile_id)
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("listing menu grants", e))
                })
            })
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
