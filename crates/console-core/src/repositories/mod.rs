//! Repository traits (ports)
//!
//! Every call runs inside the caller's identity-bound transaction, so row
//! policies in the store decide visibility. Implementations never re-check
//! ownership themselves.

pub mod application_repository;
pub mod profile_repository;
pub mod menu_repository;
pub mod profile_menu_repository;
pub mod user_profile_repository;

pub use application_repository::ApplicationRepository;
pub use profile_repository::ProfileRepository;
pub use menu_repository::MenuRepository;
pub use profile_menu_repository::ProfileMenuRepository;
pub use user_profile_repository::UserProfileRepository;

#[cfg(any(test, feature = "mocks"))]
pub use application_repository::MockApplicationRepository;
#[cfg(any(test, feature = "mocks"))]
pub use profile_repository::MockProfileRepository;
#[cfg(any(test, feature = "mocks"))]
pub use menu_repository::MockMenuRepository;
#[cfg(any(test, feature = "mocks"))]
pub use profile_menu_repository::MockProfileMenuRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user_profile_repository::MockUserProfileRepository;
