//! Presentation node of the menu hierarchy.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::menu::Menu;

/// One authorized menu entry. `children` is filled by the hierarchy builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: Uuid,
    pub description: String,
    pub parent_id: Option<Uuid>,
    pub icon: Option<String>,
    pub path: Option<String>,
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn leaf(id: Uuid, description: impl Into<String>, parent_id: Option<Uuid>) -> Self {
        Self {
            id,
            description: description.into(),
            parent_id,
            icon: None,
            path: None,
            children: Vec::new(),
        }
    }

    /// Number of nodes below this one, at any depth.
    pub fn descendant_count(&self) -> usize {
        self.children.iter().map(|c| 1 + c.descendant_count()).sum()
    }
}

impl From<Menu> for MenuNode {
    fn from(menu: Menu) -> Self {
        Self {
            id: menu.id,
            description: menu.description,
            parent_id: menu.parent_menu_id,
            icon: menu.icon,
            path: menu.path,
            children: Vec::new(),
        }
    }
}
