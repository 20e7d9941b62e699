// ============================================================================
// Console Core - Menu Service
// File: crates/console-core/src/services/menu_service.rs
// ============================================================================

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::context::SecurityContext;
use crate::domain::{Menu, MenuChanges, MenuDraft, MenuNode};
use crate::error::DomainError;
use crate::repositories::MenuRepository;
use crate::services::menu_tree::build_hierarchy;

pub struct MenuService {
    repo: Arc<dyn MenuRepository>,
}

impl MenuService {
    pub fn new(repo: Arc<dyn MenuRepository>) -> Self {
        Self { repo }
    }

    /// Menu forest the caller's profiles grant in one application.
    pub async fn user_menu(&self, ctx: &SecurityContext, application_id: Uuid) -> Result<Vec<MenuNode>, DomainError> {
        let flat = self.repo.authorized_for_user(ctx, application_id).await?;
        debug!("Caller is granted {} menus in application {}", flat.len(), application_id);
        Ok(build_hierarchy(flat))
    }

    /// Forest of every active menu in the application.
    pub async fn application_tree(
        &self,
        ctx: &SecurityContext,
        application_id: Uuid,
    ) -> Result<Vec<MenuNode>, DomainError> {
        let menus = self.repo.list_by_application(ctx, application_id).await?;
        Ok(build_hierarchy(menus.into_iter().map(MenuNode::from).collect()))
    }

    pub async fn children(&self, ctx: &SecurityContext, parent_id: Uuid) -> Result<Vec<Menu>, DomainError> {
        self.repo.list_children(ctx, parent_id).await
    }

    pub async fn list_all(&self, ctx: &SecurityContext) -> Result<Vec<Menu>, DomainError> {
        self.repo.list_all(ctx).await
    }

    pub async fn get(&self, ctx: &SecurityContext, id: Uuid) -> Result<Menu, DomainError> {
        self.repo
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Menu", id))
    }

    pub async fn create(&self, ctx: &SecurityContext, draft: MenuDraft) -> Result<Menu, DomainError> {
        let menu = self.repo.create(ctx, draft).await?;
        info!("Menu created: {} (application {})", menu.id, menu.application_id);
        Ok(menu)
    }

    pub async fn update(&self, ctx: &SecurityContext, id: Uuid, changes: MenuChanges) -> Result<Menu, DomainError> {
        if changes.is_empty() {
            return Err(DomainError::validation("No data to update"));
        }
        let menu = self.repo.update(ctx, id, changes).await?;
        info!("Menu updated: {}", id);
        Ok(menu)
    }

    pub async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(ctx, id).await?;
        info!("Menu deactivated: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParentChange;
    use crate::repositories::MockMenuRepository;
    use crate::testing::{context, menu};

    #[tokio::test]
    async fn test_user_menu_builds_forest() {
        let app = Uuid::new_v4();
        let (root, child, orphan) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut repo = MockMenuRepository::new();
        repo.expect_authorized_for_user()
            .withf(move |_, id| *id == app)
            .times(1)
            .returning(move |_, _| {
                Ok(vec![
                    MenuNode::leaf(root, "Home", None),
                    MenuNode::leaf(child, "Reports", Some(root)),
                    MenuNode::leaf(orphan, "Audit", Some(Uuid::new_v4())),
                ])
            });

        let forest = MenuService::new(Arc::new(repo)).user_menu(&context("user"), app).await.unwrap();

        let roots: Vec<Uuid> = forest.iter().map(|n| n.id).collect();
        assert_eq!(roots, vec![root, orphan]);
        assert_eq!(forest[0].children[0].id, child);
    }

    #[tokio::test]
    async fn test_application_tree() {
        let app = Uuid::new_v4();
        let parent = menu(app, None);
        let child = menu(app, Some(parent.id));
        let (parent_id, child_id) = (parent.id, child.id);

        let mut repo = MockMenuRepository::new();
        repo.expect_list_by_application()
            .returning(move |_, _| Ok(vec![child.clone(), parent.clone()]));

        let forest = MenuService::new(Arc::new(repo))
            .application_tree(&context("admin"), app)
            .await
            .unwrap();

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, parent_id);
        assert_eq!(forest[0].children[0].id, child_id);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let mut repo = MockMenuRepository::new();
        repo.expect_authorized_for_user()
            .returning(|_, _| Err(DomainError::Query("fn_menu_usuario failed".to_string())));

        let err = MenuService::new(Arc::new(repo))
            .user_menu(&context("user"), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(err.is_internal());
    }

    #[tokio::test]
    async fn test_update_rejects_empty_changes() {
        let service = MenuService::new(Arc::new(MockMenuRepository::new()));
        let changes = MenuChanges {
            description: None,
            parent: ParentChange::Keep,
            icon: None,
            path: None,
        };

        let err = service.update(&context("admin"), Uuid::new_v4(), changes).await.unwrap_err();
        assert_eq!(err, DomainError::validation("No data to update"));
    }

    #[tokio::test]
    async fn test_create_surfaces_parent_validation() {
        let mut repo = MockMenuRepository::new();
        repo.expect_create()
            .returning(|_, _| Err(DomainError::validation("Parent menu belongs to another application")));

        let draft = MenuDraft::new(Uuid::new_v4(), "Settings", Some(Uuid::new_v4()), None, None).unwrap();
        let err = MenuService::new(Arc::new(repo))
            .create(&context("admin"), draft)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
