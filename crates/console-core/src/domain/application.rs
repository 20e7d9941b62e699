// ============================================================================
// Console Core - Application Entity
// File: crates/console-core/src/domain/application.rs
// Description: Top-level tenant application
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use console_shared::types::AuditFields;

use crate::error::DomainError;

/// Application entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub description: String,
    #[serde(flatten)]
    pub audit: AuditFields,
    pub active: bool,
}

/// Caller-controlled fields of an application, for create and update alike.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ApplicationDraft {
    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,
}

impl ApplicationDraft {
    pub fn new(description: &str) -> Result<Self, DomainError> {
        let draft = Self {
            description: description.trim().to_string(),
        };

        draft.validate()?;
        Ok(draft)
    }
}
