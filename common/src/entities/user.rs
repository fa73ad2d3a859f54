use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

use crate::{default_timestamp, repository::Entity};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub given_name: String,
    pub family_name: String,
    #[serde(default = "default_timestamp")]
    pub last_modified: i64,
}

impl User {
    pub fn full_name(&self) -> String {
        if self.family_name.is_empty() {
            self.given_name.clone()
        } else {
            format!("{} {}", self.given_name, self.family_name)
        }
    }
}

impl Entity for User {
    fn id(&self) -> Bson {
        Bson::Int64(self.id)
    }

    fn last_modified(&self) -> i64 {
        self.last_modified
    }
}
