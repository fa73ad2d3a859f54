use serde::{Deserialize, Serialize};

use crate::error::{self, AddCode};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Role {
    #[serde(alias = "manager")]
    Manager,
    #[serde(alias = "subEditor", alias = "sub_editor")]
    SubEditor,
}

/// Ordered preference when picking the user group an editor is assigned
/// under: a sub-editor group wins over a manager group.
pub const ASSIGNMENT_ROLE_PRIORITY: [Role; 2] = [Role::SubEditor, Role::Manager];

impl Role {
    pub fn parse(s: &str) -> error::Result<Role> {
        match s.to_lowercase().as_str() {
            "manager" => Ok(Role::Manager),
            "subeditor" | "sub_editor" => Ok(Role::SubEditor),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s).code(400)),
        }
    }

    pub fn stringify(&self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::SubEditor => "SubEditor",
        }
    }
}
