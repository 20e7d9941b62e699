// ============================================================================
// Console Core - Profile Entity
// File: crates/console-core/src/domain/profile.rs
// Description: Role profile scoped to one application
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use console_shared::types::AuditFields;

use crate::error::DomainError;

/// Profile entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub application_id: Uuid,
    pub description: String,
    #[serde(flatten)]
    pub audit: AuditFields,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProfileDraft {
    pub application_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,
}

impl ProfileDraft {
    pub fn new(application_id: Uuid, description: &str) -> Result<Self, DomainError> {
        let draft = Self {
            application_id,
            description: description.trim().to_string(),
        };

        draft.validate()?;
        Ok(draft)
    }
}

/// A profile only ever changes its description; the owning application is fixed.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProfileChanges {
    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,
}

impl ProfileChanges {
    pub fn new(description: Option<&str>) -> Result<Self, DomainError> {
        let description = description
            .map(str::trim)
            .ok_or_else(|| DomainError::validation("No data to update"))?;
        if description.is_empty() {
            return Err(DomainError::validation("Description must not be blank"));
        }

        let changes = Self {
            description: description.to_string(),
        };
        changes.validate()?;
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_profile_draft() {
        let draft = ProfileDraft::new(Uuid::new_v4(), " Supervisors ").unwrap();
        assert_eq!(draft.description, "Supervisors");
    }

    #[test]
    fn test_empty_changes_rejected() {
        assert!(matches!(ProfileChanges::new(None), Err(DomainError::Validation(_))));
        assert_eq!(
            ProfileChanges::new(Some("  ")),
            Err(DomainError::validation("Description must not be blank"))
        );
    }
}
