//! JWT token verification

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use console_shared::config::JwtSettings;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Token audience mismatch")]
    InvalidAudience,
}

/// Role carried inside the identity provider's metadata blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleMetadata {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Claim set issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<RoleMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_user_meta_data: Option<RoleMetadata>,
}

/// Verifies HS256 bearer tokens signed with the identity provider's secret.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, audience: Option<&str>, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        match audience.filter(|a| !a.is_empty()) {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_settings(settings: &JwtSettings) -> Self {
        Self::new(&settings.secret, Some(settings.audience.as_str()), settings.leeway_secs)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidAudience => JwtError::InvalidAudience,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn claims(exp_offset: i64, aud: Option<&str>) -> Claims {
        Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: Some("ana@example.com".to_string()),
            aud: aud.map(str::to_string),
            role: Some("authenticated".to_string()),
            exp: Utc::now().timestamp() + exp_offset,
            iat: Some(Utc::now().timestamp()),
            user_metadata: None,
            raw_user_meta_data: Some(RoleMetadata { role: Some("admin".to_string()), ..Default::default() }),
        }
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = TokenVerifier::new(SECRET, Some("authenticated"), 0);
        let token = sign(&claims(3600, Some("authenticated")), SECRET);

        let verified = verifier.verify(&token).unwrap();
        assert_eq!(verified.email.as_deref(), Some("ana@example.com"));
        assert_eq!(
            verified.raw_user_meta_data.and_then(|m| m.role).as_deref(),
            Some("admin")
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = TokenVerifier::new(SECRET, None, 0);
        let token = sign(&claims(-3600, None), SECRET);
        assert!(matches!(verifier.verify(&token), Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = TokenVerifier::new(SECRET, None, 0);
        let token = sign(&claims(3600, None), "another-secret");
        assert!(matches!(verifier.verify(&token), Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_audience_mismatch_rejected() {
        let verifier = TokenVerifier::new(SECRET, Some("authenticated"), 0);
        let token = sign(&claims(3600, Some("anon")), SECRET);
        assert!(matches!(verifier.verify(&token), Err(JwtError::InvalidAudience)));
    }

    #[test]
    fn test_empty_audience_skips_check() {
        let verifier = TokenVerifier::new(SECRET, Some(""), 0);
        let token = sign(&claims(3600, Some("anything")), SECRET);
        assert!(verifier.verify(&token).is_ok());
    }
}
