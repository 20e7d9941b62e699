// ============================================================================
// Console Core - ProfileMenu Entity
// File: crates/console-core/src/domain/profile_menu.rs
// Description: Grants a profile visibility of one menu node
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use console_shared::types::AuditFields;

use crate::domain::{Menu, Profile};
use crate::error::DomainError;

/// ProfileMenu entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMenu {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub menu_id: Uuid,
    pub application_id: Uuid,
    #[serde(flatten)]
    pub audit: AuditFields,
    pub active: bool,
}

/// New grant. `application_id` is taken from the profile, never from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileMenuDraft {
    pub profile_id: Uuid,
    pub menu_id: Uuid,
    pub application_id: Uuid,
}

impl ProfileMenuDraft {
    /// Pairs a profile with a menu of the same application.
    pub fn link(profile: &Profile, menu: &Menu) -> Result<Self, DomainError> {
        if menu.application_id != profile.application_id {
            return Err(DomainError::validation(
                "Menu and profile belong to different applications",
            ));
        }

        Ok(Self {
            profile_id: profile.id,
            menu_id: menu.id,
            application_id: profile.application_id,
        })
    }
}
