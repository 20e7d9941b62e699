//! # Console Core - Domain Module
//! 
//! Domain entities for the admin console.

pub mod application;
pub mod profile;
pub mod menu;
pub mod menu_node;
pub mod profile_menu;
pub mod user_profile;

// Re-export all entities and drafts
pub use application::{Application, ApplicationDraft};
pub use profile::{Profile, ProfileChanges, ProfileDraft};
pub use menu::{Menu, MenuChanges, MenuDraft, ParentChange};
pub use menu_node::MenuNode;
pub use profile_menu::{ProfileMenu, ProfileMenuDraft};
pub use user_profile::UserProfile;
