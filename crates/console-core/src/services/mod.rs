//! Domain services (business logic)

pub mod application_service;
pub mod authorization;
pub mod menu_service;
pub mod menu_tree;
pub mod profile_service;

pub use application_service::ApplicationService;
pub use authorization::{AccessResolver, AuthorizationResolver};
pub use menu_service::MenuService;
pub use menu_tree::build_hierarchy;
pub use profile_service::ProfileService;

#[cfg(any(test, feature = "mocks"))]
pub use authorization::MockAccessResolver;
