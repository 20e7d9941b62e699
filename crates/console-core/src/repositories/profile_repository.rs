//! Profile repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::SecurityContext;
use crate::domain::{Profile, ProfileChanges, ProfileDraft};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, ctx: &SecurityContext, draft: ProfileDraft) -> Result<Profile, DomainError>;
    async fn update(&self, ctx: &SecurityContext, id: Uuid, changes: ProfileChanges) -> Result<Profile, DomainError>;
    async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError>;
    async fn find_by_id(&self, ctx: &SecurityContext, id: Uuid) -> Result<Option<Profile>, DomainError>;
    async fn list_by_application(&self, ctx: &SecurityContext, application_id: Uuid) -> Result<Vec<Profile>, DomainError>;
    async fn list_all(&self, ctx: &SecurityContext) -> Result<Vec<Profile>, DomainError>;
}
