//! Domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Caller-supplied input violates a precondition.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Target row is absent, inactive, or hidden by row policies.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The store refused the identity binding for the transaction.
    #[error("Security context binding failed: {0}")]
    ContextBinding(String),

    #[error("Database error: {0}")]
    Query(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Server-side failures that must always reach the error log.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::ContextBinding(_) | Self::Query(_))
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
