use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use console_core::domain::ParentChange;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMenuRequest {
    pub application_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,

    pub parent_menu_id: Option<Uuid>,

    #[validate(length(max = 255, message = "Menu icon too long"))]
    pub icon: Option<String>,

    #[validate(length(max = 255, message = "Menu path too long"))]
    pub path: Option<String>,
}

/// `parent_menu_id` absent keeps the parent, `null` detaches the menu, and a
/// value moves it under that parent.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMenuRequest {
    #[validate(length(max = 255, message = "Description too long"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub parent_menu_id: Option<Option<Uuid>>,

    #[validate(length(max = 255, message = "Menu icon too long"))]
    pub icon: Option<String>,

    #[validate(length(max = 255, message = "Menu path too long"))]
    pub path: Option<String>,
}

impl UpdateMenuRequest {
    pub fn parent_change(&self) -> ParentChange {
        match self.parent_menu_id {
            None => ParentChange::Keep,
            Some(None) => ParentChange::Detach,
            Some(Some(id)) => ParentChange::Attach(id),
        }
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Uuid>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct UserMenuQuery {
    pub app_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_change_from_payload() {
        let keep: UpdateMenuRequest = serde_json::from_str(r#"{"description":"Sales"}"#).unwrap();
        assert_eq!(keep.parent_change(), ParentChange::Keep);

        let detach: UpdateMenuRequest = serde_json::from_str(r#"{"parent_menu_id":null}"#).unwrap();
        assert_eq!(detach.parent_change(), ParentChange::Detach);

        let id = Uuid::new_v4();
        let attach: UpdateMenuRequest =
            serde_json::from_str(&format!(r#"{{"parent_menu_id":"{}"}}"#, id)).unwrap();
        assert_eq!(attach.parent_change(), ParentChange::Attach(id));
    }
}
