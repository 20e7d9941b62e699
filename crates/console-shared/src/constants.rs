//! Application-wide constants

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_DEFAULT: &str = "user";
pub const DEFAULT_AUDIENCE: &str = "authenticated";
pub const CLAIMS_SETTING: &str = "request.jwt.claims";
pub const CREDENTIAL_FINGERPRINT_LEN: usize = 12;
pub const MAX_DESCRIPTION_LENGTH: u64 = 255;
pub const MAX_MENU_DEPTH: usize = 32;
