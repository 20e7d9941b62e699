// ============================================================================
// Console Infrastructure - PostgreSQL Menu Repository
// File: crates/console-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::debug;
use uuid::Uuid;

use console_core::domain::menu::check_parent_link;
use console_core::domain::{Menu, MenuChanges, MenuDraft, MenuNode, ParentChange};
use console_core::repositories::MenuRepository;
use console_core::{DomainError, SecurityContext, SecurityContextManager};
use console_shared::constants::MAX_MENU_DEPTH;
use console_shared::types::AuditFields;

use super::error::map_sqlx_error;
use super::store::PgPolicyStore;

pub struct PgMenuRepository {
    manager: SecurityContextManager<PgPolicyStore>,
}

impl PgMenuRepository {
    pub fn new(manager: SecurityContextManager<PgPolicyStore>) -> Self {
        Self { manager }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct MenuRow {
    idmenu: Uuid,
    idaplicacion: Uuid,
    descripcion: String,
    menupadre: Option<Uuid>,
    icono: Option<String>,
    path: Option<String>,
    fechacreacion: DateTime<Utc>,
    usuariocreacion: String,
    fechaactualizacion: Option<DateTime<Utc>>,
    usuarioactualizacion: Option<String>,
    estado: bool,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.idmenu,
            application_id: row.idaplicacion,
            description: row.descripcion,
            parent_menu_id: row.menupadre,
            icon: row.icono,
            path: row.path,
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

// Shape returned by fn_menu_usuario.
#[derive(Debug, FromRow)]
struct AuthorizedMenuRow {
    idmenu: Uuid,
    descripcion: String,
    menupadre: Option<Uuid>,
    icono: Option<String>,
    path: Option<String>,
}

impl From<AuthorizedMenuRow> for MenuNode {
    fn from(row: AuthorizedMenuRow) -> Self {
        MenuNode {
            id: row.idmenu,
            description: row.descripcion,
            parent_id: row.menupadre,
            icon: row.icono,
            path: row.path,
            children: Vec::new(),
        }
    }
}

/// `start` followed by its ancestors, nearest first. Stops after
/// `MAX_MENU_DEPTH + 1` rows so stored cycles cannot loop forever.
async fn lineage(conn: &mut PgConnection, start: Uuid) -> Result<Vec<Menu>, DomainError> {
    let rows = sqlx::query_as::<_, MenuRow>(
        r#"
        WITH RECURSIVE lineage AS (
            SELECT
                idmenu, idaplicacion, descripcion, menupadre, icono, path,
                fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                estado, 1 AS depth
            FROM menu
            WHERE idmenu = $1
            UNION ALL
            SELECT
                m.idmenu, m.idaplicacion, m.descripcion, m.menupadre, m.icono, m.path,
                m.fechacreacion, m.usuariocreacion, m.fechaactualizacion, m.usuarioactualizacion,
                m.estado, l.depth + 1
            FROM menu m
            JOIN lineage l ON m.idmenu = l.menupadre
            WHERE l.depth <= $2
        )
        SELECT
            idmenu, idaplicacion, descripcion, menupadre, icono, path,
            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
            estado
        FROM lineage
        ORDER BY depth
        "#,
    )
    .bind(start)
    .bind(MAX_MENU_DEPTH as i32)
    .fetch_all(conn)
    .await
    .map_err(|e| map_sqlx_error("resolving menu lineage", e))?;

    Ok(rows.into_iter().map(Into::into).collect())
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn create(&self, ctx: &SecurityContext, draft: MenuDraft) -> Result<Menu, DomainError> {
        let row = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    if let Some(parent_id) = draft.parent_menu_id {
                        let ancestors = lineage(&mut **tx, parent_id).await?;
                        check_parent_link(None, draft.application_id, parent_id, &ancestors)?;
                    }

                    sqlx::query_as::<_, MenuRow>(
                        r#"
                        INSERT INTO menu (idaplicacion, descripcion, menupadre, icono, path)
                        VALUES ($1, $2, $3, $4, $5)
                        RETURNING
                            idmenu, idaplicacion, descripcion, menupadre, icono, path,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        "#,
                    )
                    .bind(draft.application_id)
                    .bind(&draft.description)
                    .bind(draft.parent_menu_id)
                    .bind(&draft.icon)
                    .bind(&draft.path)
                    .fetch_one(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("creating menu", e))
                })
            })
            .await?;

        Ok(row.into())
    }

    async fn update(&self, ctx: &SecurityContext, id: Uuid, changes: MenuChanges) -> Result<Menu, DomainError> {
        let row = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    let current = sqlx::query_as::<_, MenuRow>(
                        r#"
                        SELECT
                            idmenu, idaplicacion, descripcion, menupadre, icono, path,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM menu
                        WHERE idmenu = $1 AND estado = true
                        FOR UPDATE
                        "#,
                    )
                    .bind(id)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("loading menu", e))?
                    .ok_or_else(|| DomainError::not_found("Menu", id))?;

                    let parent = match changes.parent {
                        ParentChange::Keep => current.menupadre,
                        ParentChange::Detach => None,
                        ParentChange::Attach(parent_id) => {
                            let ancestors = lineage(&mut **tx, parent_id).await?;
                            check_parent_link(Some(id), current.idaplicacion, parent_id, &ancestors)?;
                            Some(parent_id)
                        }
                    };

                    sqlx::query_as::<_, MenuRow>(
                        r#"
                        UPDATE menu
                        SET descripcion = COALESCE($2, descripcion),
                            menupadre = $3,
                            icono = COALESCE($4, icono),
                            path = COALESCE($5, path)
                        WHERE idmenu = $1 AND estado = true
                        RETURNING
                            idmenu, idaplicacion, descripcion, menupadre, icono, path,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        "#,
                    )
                    .bind(id)
                    .bind(&changes.description)
                    .bind(parent)
                    .bind(&changes.icon)
                    .bind(&changes.path)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("updating menu", e))?
                    .ok_or_else(|| DomainError::not_found("Menu", id))
                })
            })
            .await?;

        Ok(row.into())
    }

    async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError> {
        self.manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    let result = sqlx::query("UPDATE menu SET estado = false WHERE idmenu = $1 AND estado = true")
                        .bind(id)
                        .execute(&mut **tx)
                        .await
                        .map_err(|e| map_sqlx_error("deleting menu", e))?;

                    if result.rows_affected() == 0 {
                        return Err(DomainError::not_found("Menu", id));
                    }
                    Ok(())
                })
            })
            .await
    }

    async fn find_by_id(&self, ctx: &SecurityContext, id: Uuid) -> Result<Option<Menu>, DomainError> {
        let row = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, MenuRow>(
                        r#"
                        SELECT
                            idmenu, idaplicacion, descripcion, menupadre, icono, path,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM menu
                        WHERE idmenu = $1 AND estado = true
                        "#,
                    )
                    .bind(id)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("finding menu", e))
                })
            })
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_application(&self, ctx: &SecurityContext, application_id: Uuid) -> Result<Vec<Menu>, DomainError> {
        let rows = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, MenuRow>(
                        r#"
                        SELECT
                            idmenu, idaplicacion, descripcion, menupadre, icono, path,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM menu
                        WHERE idaplicacion = $1 AND estado = true
                        ORDER BY descripcion, idmenu
                        "#,
                    )
                    .bind(application_id)
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("listing application menus", e))
                })
            })
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_children(&self, ctx: &SecurityContext, parent_id: Uuid) -> Result<Vec<Menu>, DomainError> {
        let rows = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, MenuRow>(
                        r#"
                        SELECT
                            idmenu, idaplicacion, descripcion, menupadre, icono, path,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM menu
                        WHERE menupadre = $1 AND estado = true
                        ORDER BY descripcion, idmenu
                        "#,
                    )
                    .bind(parent_id)
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("listing child menus", e))
                })
            })
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self, ctx: &SecurityContext) -> Result<Vec<Menu>, DomainError> {
        let rows = self
            .manager
            .run_with_context(ctx, |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, MenuRow>(
                        r#"
                        SELECT
                            idmenu, idaplicacion, descripcion, menupadre, icono, path,
                            fechacreacion, usuariocreacion, fechaactualizacion, usuarioactualizacion,
                            estado
                        FROM menu
                        WHERE estado = true
                        ORDER BY idaplicacion, descripcion, idmenu
                        "#,
                    )
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("listing all menus", e))
                })
            })
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn authorized_for_user(&self, ctx: &SecurityContext, application_id: Uuid) -> Result<Vec<MenuNode>, DomainError> {
        let rows = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, AuthorizedMenuRow>(
                        "SELECT idmenu, descripcion, menupadre, icono, path FROM public.fn_menu_usuario($1)",
                    )
                    .bind(application_id)
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(|e| map_sqlx_error("calling fn_menu_usuario", e))
                })
            })
            .await?;

        debug!("fn_menu_usuario returned {} rows for application {}", rows.len(), application_id);
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorized_row_becomes_leaf_node() {
        let parent = Uuid::new_v4();
        let node = MenuNode::from(AuthorizedMenuRow {
            idmenu: Uuid::new_v4(),
            descripcion: "Invoices".to_string(),
            menupadre: Some(parent),
            icono: Some("receipt".to_string()),
            path: Some("/billing/invoices".to_string()),
        });

        assert_eq!(node.parent_id, Some(parent));
        assert_eq!(node.path.as_deref(), Some("/billing/invoices"));
        assert!(node.children.is_empty());
    }
}
