//! Menu repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::SecurityContext;
use crate::domain::{Menu, MenuChanges, MenuDraft, MenuNode};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Validates the parent link inside the same transaction as the insert.
    async fn create(&self, ctx: &SecurityContext, draft: MenuDraft) -> Result<Menu, DomainError>;

    async fn update(&self, ctx: &SecurityContext, id: Uuid, changes: MenuChanges) -> Result<Menu, DomainError>;
    async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError>;
    async fn find_by_id(&self, ctx: &SecurityContext, id: Uuid) -> Result<Option<Menu>, DomainError>;
    async fn list_by_application(&self, ctx: &SecurityContext, application_id: Uuid) -> Result<Vec<Menu>, DomainError>;

    /// Active direct children of `parent_id`.
    async fn list_children(&self, ctx: &SecurityContext, parent_id: Uuid) -> Result<Vec<Menu>, DomainError>;

    async fn list_all(&self, ctx: &SecurityContext) -> Result<Vec<Menu>, DomainError>;

    /// Flat list of the menus the bound caller's profiles grant in one
    /// application, in store order.
    async fn authorized_for_user(&self, ctx: &SecurityContext, application_id: Uuid) -> Result<Vec<MenuNode>, DomainError>;
}
