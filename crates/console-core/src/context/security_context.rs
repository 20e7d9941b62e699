// ============================================================================
// Console Core - Security Context
// File: crates/console-core/src/context/security_context.rs
// ============================================================================

use std::fmt;

use console_security::{credential_fingerprint, Principal};

use crate::error::DomainError;

/// Identity of one inbound request: the verified principal plus the raw
/// bearer credential it was derived from. Lives exactly as long as the
/// request and is never shared between requests.
pub struct SecurityContext {
    principal: Principal,
    raw_credential: String,
    fingerprint: String,
}

impl SecurityContext {
    pub fn new(principal: Principal, raw_credential: impl Into<String>) -> Result<Self, DomainError> {
        let raw_credential = raw_credential.into();
        if raw_credential.trim().is_empty() {
            return Err(DomainError::validation("bearer credential is required"));
        }
        if principal.email.trim().is_empty() {
            return Err(DomainError::validation("principal email is required"));
        }

        let fingerprint = credential_fingerprint(&raw_credential);
        Ok(Self {
            principal,
            raw_credential,
            fingerprint,
        })
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn raw_credential(&self) -> &str {
        &self.raw_credential
    }

    /// Log-safe digest of the credential.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl fmt::Debug for SecurityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityContext")
            .field("principal", &self.principal)
            .field("credential", &self.fingerprint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn principal() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn test_requires_credential() {
        assert!(matches!(
            SecurityContext::new(principal(), "  "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_requires_email() {
        let mut p = principal();
        p.email = String::new();
        assert!(SecurityContext::new(p, "token").is_err());
    }

    #[test]
    fn test_debug_hides_credential() {
        let ctx = SecurityContext::new(principal(), "very-secret-token").unwrap();
        let rendered = format!("{:?}", ctx);
        assert!(!rendered.contains("very-secret-token"));
        assert!(rendered.contains(ctx.fingerprint()));
    }
}
