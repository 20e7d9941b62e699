use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileRequest {
    pub application_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 255, message = "Description too long"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AssignProfileRequest {
    pub user_id: Uuid,
    pub profile_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GrantMenuRequest {
    pub menu_id: Uuid,
}
