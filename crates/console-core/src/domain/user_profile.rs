//! User to profile assignment.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use console_shared::types::AuditFields;

/// A user holds a profile while `active` is true. Removal flips the flag;
/// assigning again reactivates the same row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_id: Uuid,
    #[serde(flatten)]
    pub audit: AuditFields,
    pub active: bool,
}
