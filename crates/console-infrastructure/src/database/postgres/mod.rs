//! PostgreSQL repository implementations
//!
//! Every statement runs through [`SecurityContextManager`] so the row
//! policies see the caller bound in `request.jwt.claims`.
//!
//! [`SecurityContextManager`]: console_core::SecurityContextManager

mod error;

pub mod store;
pub mod application_repo_impl;
pub mod profile_repo_impl;
pub mod menu_repo_impl;
pub mod profile_menu_repo_impl;
pub mod user_profile_repo_impl;

pub use store::PgPolicyStore;
pub use application_repo_impl::PgApplicationRepository;
pub use profile_repo_impl::PgProfileRepository;
pub use menu_repo_impl::PgMenuRepository;
pub use profile_menu_repo_impl::PgProfileMenuRepository;
pub use user_profile_repo_impl::PgUserProfileRepository;
