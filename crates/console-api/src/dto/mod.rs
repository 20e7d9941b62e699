//! Request and response DTOs

pub mod application;
pub mod menu;
pub mod profile;

pub use application::{AccessResponse, AdminStatusResponse, ApplicationRequest, UpdateApplicationRequest};
pub use menu::{CreateMenuRequest, UpdateMenuRequest, UserMenuQuery};
pub use profile::{AssignProfileRequest, CreateProfileRequest, GrantMenuRequest, UpdateProfileRequest};
