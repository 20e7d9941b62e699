// ============================================================================
// Console Core - Menu Entity
// File: crates/console-core/src/domain/menu.rs
// Description: Menu hierarchy entity
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use console_shared::constants::MAX_MENU_DEPTH;
use console_shared::types::AuditFields;
use console_shared::utils::normalize_text;

use crate::error::DomainError;

/// Menu entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: Uuid,
    pub application_id: Uuid,
    pub description: String,
    pub parent_menu_id: Option<Uuid>,
    pub icon: Option<String>,
    pub path: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
    pub active: bool,
}

impl Menu {
    pub fn is_root_menu(&self) -> bool {
        self.parent_menu_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct MenuDraft {
    pub application_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,

    pub parent_menu_id: Option<Uuid>,

    #[validate(length(max = 255, message = "Menu icon too long"))]
    pub icon: Option<String>,

    #[validate(length(max = 255, message = "Menu path too long"))]
    pub path: Option<String>,
}

impl MenuDraft {
    pub fn new(
        application_id: Uuid,
        description: &str,
        parent_menu_id: Option<Uuid>,
        icon: Option<&str>,
        path: Option<&str>,
    ) -> Result<Self, DomainError> {
        let draft = Self {
            application_id,
            description: description.trim().to_string(),
            parent_menu_id,
            icon: normalize_text(icon),
            path: normalize_text(path),
        };

        draft.validate()?;
        Ok(draft)
    }
}

/// How an update treats the parent link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentChange {
    #[default]
    Keep,
    Detach,
    Attach(Uuid),
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct MenuChanges {
    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: Option<String>,

    pub parent: ParentChange,

    #[validate(length(max = 255, message = "Menu icon too long"))]
    pub icon: Option<String>,

    #[validate(length(max = 255, message = "Menu path too long"))]
    pub path: Option<String>,
}

impl MenuChanges {
    pub fn new(
        description: Option<&str>,
        parent: ParentChange,
        icon: Option<&str>,
        path: Option<&str>,
    ) -> Result<Self, DomainError> {
        if description.is_some_and(|d| d.trim().is_empty()) {
            return Err(DomainError::validation("Description must not be blank"));
        }

        let changes = Self {
            description: normalize_text(description),
            parent,
            icon: normalize_text(icon),
            path: normalize_text(path),
        };

        if changes.is_empty() {
            return Err(DomainError::validation("No data to update"));
        }
        changes.validate()?;
        Ok(changes)
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.parent == ParentChange::Keep
            && self.icon.is_none()
            && self.path.is_none()
    }
}

/// Checks that `menu_id` (or a new node when `None`) may hang under
/// `parent_id`. `lineage` is the parent followed by its ancestors up to the
/// root, as stored.
pub fn check_parent_link(
    menu_id: Option<Uuid>,
    application_id: Uuid,
    parent_id: Uuid,
    lineage: &[Menu],
) -> Result<(), DomainError> {
    let parent = lineage
        .first()
        .filter(|m| m.id == parent_id && m.active)
        .ok_or_else(|| DomainError::validation(format!("Parent menu {} not found", parent_id)))?;

    if parent.application_id != application_id {
        return Err(DomainError::validation(format!(
            "Parent menu {} belongs to another application",
            parent_id
        )));
    }

    if let Some(id) = menu_id {
        if lineage.iter().any(|m| m.id == id) {
            return Err(DomainError::validation(format!(
                "Menu {} cannot be placed under its own descendant",
                id
            )));
        }
    }

    if lineage.len() >= MAX_MENU_DEPTH {
        return Err(DomainError::validation(format!(
            "Menu hierarchy cannot exceed {} levels",
            MAX_MENU_DEPTH
        )));
    }

    Ok(())
}
