//! UserProfile repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::SecurityContext;
use crate::domain::{Profile, UserProfile};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Inserts the assignment, or reactivates a removed one, in one unit of
    /// work. `NotFound` when the profile is not active; `Validation` when the
    /// user already holds it.
    async fn assign(&self, ctx: &SecurityContext, user_id: Uuid, profile_id: Uuid) -> Result<UserProfile, DomainError>;

    /// Flips the assignment inactive; `NotFound` when none is active.
    async fn remove(&self, ctx: &SecurityContext, user_id: Uuid, profile_id: Uuid) -> Result<(), DomainError>;

    /// Active profiles currently assigned to `user_id`.
    async fn profiles_for_user(&self, ctx: &SecurityContext, user_id: Uuid) -> Result<Vec<Profile>, DomainError>;
}
