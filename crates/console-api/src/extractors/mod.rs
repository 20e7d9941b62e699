//! Request extractors

pub mod auth;
pub mod json;
pub mod params;

pub use auth::{AdminContext, AuthContext};
pub use json::ValidatedJson;
pub use params::{ApiPath, ApiQuery};
