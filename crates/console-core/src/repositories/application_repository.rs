//! Application repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::SecurityContext;
use crate::domain::{Application, ApplicationDraft};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn create(&self, ctx: &SecurityContext, draft: ApplicationDraft) -> Result<Application, DomainError>;

    /// Fails with `NotFound` when the row is missing or already inactive.
    async fn update(&self, ctx: &SecurityContext, id: Uuid, draft: ApplicationDraft) -> Result<Application, DomainError>;

    /// Soft delete. A second call on the same id fails with `NotFound`.
    async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError>;

    async fn find_by_id(&self, ctx: &SecurityContext, id: Uuid) -> Result<Option<Application>, DomainError>;

    /// Active applications the bound caller may see.
    async fn list_visible(&self, ctx: &SecurityContext) -> Result<Vec<Application>, DomainError>;

    /// Every application, inactive ones included.
    async fn list_all(&self, ctx: &SecurityContext) -> Result<Vec<Application>, DomainError>;
}
