//! # Console Security
//! 
//! Bearer credential parsing, JWT verification, and principal extraction.

pub mod jwt;
pub mod identity;

pub use jwt::{Claims, JwtError, TokenVerifier};
pub use identity::{credential_fingerprint, parse_bearer, IdentityError, Principal};
