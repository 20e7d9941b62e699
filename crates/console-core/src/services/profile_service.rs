// ============================================================================
// Console Core - Profile Service
// File: crates/console-core/src/services/profile_service.rs
// ============================================================================
//! Profiles, their user assignments, and their menu grants.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::context::SecurityContext;
use crate::domain::{Profile, ProfileChanges, ProfileDraft, ProfileMenu, UserProfile};
use crate::error::DomainError;
use crate::repositories::{ProfileMenuRepository, ProfileRepository, UserProfileRepository};

pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    grants: Arc<dyn ProfileMenuRepository>,
    assignments: Arc<dyn UserProfileRepository>,
}

impl ProfileService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        grants: Arc<dyn ProfileMenuRepository>,
        assignments: Arc<dyn UserProfileRepository>,
    ) -> Self {
        Self {
            profiles,
            grants,
            assignments,
        }
    }

    pub async fn list_by_application(
        &self,
        ctx: &SecurityContext,
        application_id: Uuid,
    ) -> Result<Vec<Profile>, DomainError> {
        self.profiles.list_by_application(ctx, application_id).await
    }

    pub async fn list_all(&self, ctx: &SecurityContext) -> Result<Vec<Profile>, DomainError> {
        self.profiles.list_all(ctx).await
    }

    pub async fn get(&self, ctx: &SecurityContext, id: Uuid) -> Result<Profile, DomainError> {
        self.profiles
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Profile", id))
    }

    pub async fn create(
        &self,
        ctx: &SecurityContext,
        application_id: Uuid,
        description: &str,
    ) -> Result<Profile, DomainError> {
        let draft = ProfileDraft::new(application_id, description)?;
        let profile = self.profiles.create(ctx, draft).await?;
        info!("Profile created: {} (application {})", profile.id, application_id);
        Ok(profile)
    }

    pub async fn update(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        description: Option<&str>,
    ) -> Result<Profile, DomainError> {
        let changes = ProfileChanges::new(description)?;
        let profile = self.profiles.update(ctx, id, changes).await?;
        info!("Profile updated: {}", id);
        Ok(profile)
    }

    pub async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError> {
        self.profiles.delete(ctx, id).await?;
        info!("Profile deactivated: {}", id);
        Ok(())
    }

    /// Gives `user_id` the profile. A second active assignment is rejected.
    pub async fn assign_user(
        &self,
        ctx: &SecurityContext,
        profile_id: Uuid,
        user_id: Uuid,
    ) -> Result<UserProfile, DomainError> {
        let assignment = self.assignments.assign(ctx, user_id, profile_id).await.inspect_err(|e| {
            if matches!(e, DomainError::Validation(_)) {
                warn!("User {} already holds profile {}", user_id, profile_id);
            }
        })?;
        info!("Profile {} assigned to user {}", profile_id, user_id);
        Ok(assignment)
    }

    pub async fn remove_user(
        &self,
        ctx: &SecurityContext,
        profile_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        self.assignments.remove(ctx, user_id, profile_id).await?;
        info!("Profile {} removed from user {}", profile_id, user_id);
        Ok(())
    }

    pub async fn profiles_for_user(&self, ctx: &SecurityContext, user_id: Uuid) -> Result<Vec<Profile>, DomainError> {
        let profiles = self.assignments.profiles_for_user(ctx, user_id).await?;
        debug!("User {} holds {} profiles", user_id, profiles.len());
        Ok(profiles)
    }

    pub async fn menus_of_profile(&self, ctx: &SecurityContext, profile_id: Uuid) -> Result<Vec<ProfileMenu>, DomainError> {
        self.grants.list_by_profile(ctx, profile_id).await
    }

    /// Grants the profile visibility of a menu from the same application.
    pub async fn grant_menu(
        &self,
        ctx: &SecurityContext,
        profile_id: Uuid,
        menu_id: Uuid,
    ) -> Result<ProfileMenu, DomainError> {
        let grant = self.grants.grant(ctx, profile_id, menu_id).await.inspect_err(|e| {
            if matches!(e, DomainError::Validation(_)) {
                warn!("Rejected grant of menu {} to profile {}: {}", menu_id, profile_id, e);
            }
        })?;
        info!("Menu {} granted to profile {}", menu_id, profile_id);
        Ok(grant)
    }

    pub async fn revoke_menu(&self, ctx: &SecurityContext, profile_id: Uuid, menu_id: Uuid) -> Result<(), DomainError> {
        self.grants.revoke(ctx, profile_id, menu_id).await?;
        info!("Menu {} revoked from profile {}", menu_id, profile_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockProfileMenuRepository, MockProfileRepository, MockUserProfileRepository};
    use crate::testing::{audit, context, profile};

    struct Mocks {
        profiles: MockProfileRepository,
        grants: MockProfileMenuRepository,
        assignments: MockUserProfileRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                profiles: MockProfileRepository::new(),
                grants: MockProfileMenuRepository::new(),
                assignments: MockUserProfileRepository::new(),
            }
        }

        fn service(self) -> ProfileService {
            ProfileService::new(
                Arc::new(self.profiles),
                Arc::new(self.grants),
                Arc::new(self.assignments),
            )
        }
    }

    fn assignment(user_id: Uuid, profile_id: Uuid) -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            user_id,
            profile_id,
            audit: audit(),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_create_validates_before_store() {
        let service = Mocks::new().service();
        let err = service.create(&context("admin"), Uuid::new_v4(), "").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_passes_trimmed_changes() {
        let mut mocks = Mocks::new();
        let existing = profile(Uuid::new_v4());
        let id = existing.id;
        mocks
            .profiles
            .expect_update()
            .withf(move |_, target, changes| *target == id && changes.description == "Auditors")
            .times(1)
            .returning(move |_, _, changes| {
                Ok(Profile {
                    description: changes.description,
                    ..existing.clone()
                })
            });

        let updated = mocks.service().update(&context("admin"), id, Some(" Auditors ")).await.unwrap();
        assert_eq!(updated.description, "Auditors");
    }

    #[tokio::test]
    async fn test_assign_user() {
        let mut mocks = Mocks::new();
        let (profile_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());

        mocks
            .assignments
            .expect_assign()
            .withf(move |_, user, prof| *user == user_id && *prof == profile_id)
            .times(1)
            .returning(|_, user, prof| Ok(assignment(user, prof)));

        let result = mocks.service().assign_user(&context("admin"), profile_id, user_id).await.unwrap();
        assert_eq!(result.user_id, user_id);
        assert!(result.active);
    }

    #[tokio::test]
    async fn test_duplicate_assignment_rejected() {
        let mut mocks = Mocks::new();
        mocks
            .assignments
            .expect_assign()
            .times(1)
            .returning(|_, user, prof| Err(DomainError::validation(format!("User {} already holds profile {}", user, prof))));

        let err = mocks
            .service()
            .assign_user(&context("admin"), Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_assign_to_missing_profile_is_not_found() {
        let mut mocks = Mocks::new();
        mocks
            .assignments
            .expect_assign()
            .returning(|_, _, prof| Err(DomainError::not_found("Profile", prof)));

        let err = mocks
            .service()
            .assign_user(&context("admin"), Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Profile", .. }));
    }

    #[tokio::test]
    async fn test_grant_menu_is_a_single_store_call() {
        let mut mocks = Mocks::new();
        let app = Uuid::new_v4();
        let (profile_id, menu_id) = (Uuid::new_v4(), Uuid::new_v4());

        mocks
            .grants
            .expect_grant()
            .withf(move |_, prof, menu| *prof == profile_id && *menu == menu_id)
            .times(1)
            .returning(move |_, prof, menu| {
                Ok(ProfileMenu {
                    id: Uuid::new_v4(),
                    profile_id: prof,
                    menu_id: menu,
                    application_id: app,
                    audit: audit(),
                    active: true,
                })
            });

        let grant = mocks.service().grant_menu(&context("admin"), profile_id, menu_id).await.unwrap();
        assert_eq!(grant.application_id, app);
    }

    #[tokio::test]
    async fn test_grant_menu_across_applications_rejected() {
        let mut mocks = Mocks::new();
        mocks
            .grants
            .expect_grant()
            .times(1)
            .returning(|_, _, _| Err(DomainError::validation("Menu and profile belong to different applications")));

        let err = mocks
            .service()
            .grant_menu(&context("admin"), Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("Menu and profile belong to different applications")
        );
    }

    #[tokio::test]
    async fn test_remove_missing_assignment_is_not_found() {
        let mut mocks = Mocks::new();
        mocks
            .assignments
            .expect_remove()
            .returning(|_, user, _| Err(DomainError::not_found("UserProfile", user)));

        let err = mocks
            .service()
            .remove_user(&context("admin"), Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
