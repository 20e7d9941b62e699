//! ProfileMenu repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::SecurityContext;
use crate::domain::ProfileMenu;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ProfileMenuRepository: Send + Sync {
    /// Loads the profile and the menu, pairs them through
    /// [`ProfileMenuDraft::link`], then inserts the grant or reactivates a
    /// revoked one, all in one unit of work. `Validation` when the grant is
    /// already active.
    ///
    /// [`ProfileMenuDraft::link`]: crate::domain::ProfileMenuDraft::link
    async fn grant(&self, ctx: &SecurityContext, profile_id: Uuid, menu_id: Uuid) -> Result<ProfileMenu, DomainError>;

    async fn revoke(&self, ctx: &SecurityContext, profile_id: Uuid, menu_id: Uuid) -> Result<(), DomainError>;
    async fn list_by_profile(&self, ctx: &SecurityContext, profile_id: Uuid) -> Result<Vec<ProfileMenu>, DomainError>;
}
