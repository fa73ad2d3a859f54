use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

use crate::{default_timestamp, repository::Entity};

use super::role::Role;

/// A role a set of users holds within one journal context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub id: i64,
    pub context_id: i64,
    pub role: Role,
    #[serde(default)]
    pub members: Vec<i64>,
    #[serde(default = "default_timestamp")]
    pub last_modified: i64,
}

impl UserGroup {
    pub fn has_member(&self, user_id: i64) -> bool {
        self.members.contains(&user_id)
    }
}

impl Entity for UserGroup {
    fn id(&self) -> Bson {
        Bson::Int64(self.id)
    }

    fn last_modified(&self) -> i64 {
        self.last_modified
    }
}
