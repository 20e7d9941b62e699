//! # Console Core
//! 
//! Domain entities, security-context propagation, authorization, menu
//! hierarchy resolution, and repository traits for the admin console.

pub mod domain;
pub mod context;
pub mod repositories;
pub mod services;
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

// Re-export domain entities
pub use domain::*;
pub use context::{SecurityContext, SecurityContextManager};
pub use error::DomainError;
pub use services::{
    build_hierarchy, AccessResolver, ApplicationService, AuthorizationResolver, MenuService, ProfileService,
};
