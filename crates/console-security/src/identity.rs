//! Identity extraction: bearer credential and verified claims into a [`Principal`].

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use console_shared::constants::{
    CREDENTIAL_FINGERPRINT_LEN, DEFAULT_AUDIENCE, ROLE_ADMIN, ROLE_DEFAULT,
};
use console_shared::utils::mask_email;

use crate::jwt::Claims;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Token subject missing")]
    MissingSubject,
    #[error("Token subject is not a valid user id: {0}")]
    InvalidSubject(String),
    #[error("Token email missing")]
    MissingEmail,
    #[error("Token email is malformed: {0}")]
    InvalidEmail(String),
}

/// Canonical identity of the caller. Built once per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl Principal {
    /// Role precedence: `raw_user_meta_data.role`, then `user_metadata.role`,
    /// then the top-level `role` claim, then `user`.
    pub fn from_claims(claims: &Claims) -> Result<Self, IdentityError> {
        let sub = claims.sub.trim();
        if sub.is_empty() {
            return Err(IdentityError::MissingSubject);
        }
        let id = Uuid::parse_str(sub).map_err(|_| IdentityError::InvalidSubject(sub.to_string()))?;

        let email = claims
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(IdentityError::MissingEmail)?;
        if !EmailAddress::is_valid(email) {
            return Err(IdentityError::InvalidEmail(mask_email(email)));
        }

        let role = [
            claims.raw_user_meta_data.as_ref().and_then(|m| m.role.as_deref()),
            claims.user_metadata.as_ref().and_then(|m| m.role.as_deref()),
            claims.role.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|r| !r.is_empty())
        .unwrap_or(ROLE_DEFAULT)
        .to_string();

        Ok(Self {
            id,
            email: email.to_string(),
            role,
        })
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    pub fn is_admin_role(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Claim document bound into the store session for row policies.
    pub fn session_claims(&self) -> serde_json::Value {
        serde_json::json!({
            "sub": self.id,
            "email": self.email,
            "role": self.role,
            "aud": DEFAULT_AUDIENCE,
        })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}

/// Short stable digest of a credential, safe to put in logs.
pub fn credential_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(CREDENTIAL_FINGERPRINT_LEN);
    encoded
}
