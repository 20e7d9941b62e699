use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ApplicationRequest {
    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateApplicationRequest {
    #[validate(length(max = 255, message = "Description too long"))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessResponse {
    pub application_id: Uuid,
    pub has_access: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStatusResponse {
    pub is_admin: bool,
}
