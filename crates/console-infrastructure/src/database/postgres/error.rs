//! Mapping of `sqlx` failures onto domain errors.

use tracing::{error, warn};

use console_core::DomainError;

/// Constraint violations are the caller's fault and become `Validation`;
/// everything else is a `Query` failure and is logged as an error.
pub(crate) fn map_sqlx_error(action: &str, e: sqlx::Error) -> DomainError {
    if let Some(db) = e.as_database_error() {
        if db.is_foreign_key_violation() {
            warn!("Rejected {}: {}", action, db.message());
            return DomainError::validation(format!("{}: referenced record does not exist", action));
        }
        if db.is_unique_violation() {
            warn!("Rejected {}: {}", action, db.message());
            return DomainError::validation(format!("{}: record already exists", action));
        }
        if db.is_check_violation() {
            warn!("Rejected {}: {}", action, db.message());
            return DomainError::validation(format!("{}: value out of range", action));
        }
    }

    error!("Database error {}: {}", action, e);
    DomainError::Query(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_query_failures() {
        let err = map_sqlx_error("loading menus", sqlx::Error::RowNotFound);
        assert!(matches!(err, DomainError::Query(_)));
        assert!(err.is_internal());

        let err = map_sqlx_error("loading menus", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DomainError::Query(_)));
    }
}
