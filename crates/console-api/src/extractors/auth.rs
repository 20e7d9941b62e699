// ============================================================================
// Console API - Authentication Extractors
// File: crates/console-api/src/extractors/auth.rs
// ============================================================================
//! Builds the request's [`SecurityContext`] from the bearer credential.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header::AUTHORIZATION, request::Parts};
use tracing::debug;

use console_core::SecurityContext;
use console_security::{credential_fingerprint, parse_bearer, Principal, TokenVerifier};

use crate::error::ApiError;

/// Any caller holding a valid bearer token.
pub struct AuthContext(pub SecurityContext);

impl<S> FromRequestParts<S> for AuthContext
where
    Arc<TokenVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verifier = Arc::<TokenVerifier>::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?
            .to_str()
            .map_err(|_| ApiError::Unauthorized("Malformed authorization header".to_string()))?;

        let token = parse_bearer(header)
            .ok_or_else(|| ApiError::Unauthorized("Expected a bearer token".to_string()))?;

        let claims = verifier.verify(token).map_err(|e| {
            ApiError::Unauthorized(format!("{} (credential {})", e, credential_fingerprint(token)))
        })?;
        let principal = Principal::from_claims(&claims).map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        debug!("Authenticated user {} with role {}", principal.id, principal.role);
        let context = SecurityContext::new(principal, token).map_err(|e| ApiError::Unauthorized(e.to_string()))?;
        Ok(Self(context))
    }
}

/// Caller whose principal carries the `admin` role.
pub struct AdminContext(pub SecurityContext);

impl<S> FromRequestParts<S> for AdminContext
where
    Arc<TokenVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthContext(context) = AuthContext::from_request_parts(parts, state).await?;

        if !context.principal().is_admin_role() {
            return Err(ApiError::Forbidden(format!(
                "User {} lacks the admin role",
                context.principal().id
            )));
        }
        Ok(Self(context))
    }
}
