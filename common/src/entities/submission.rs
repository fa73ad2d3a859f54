use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

use crate::{default_timestamp, repository::Entity};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub context_id: i64,
    pub locale: String,
    pub preselected_issue_id: Option<i64>,
    #[serde(default = "default_timestamp")]
    pub last_modified: i64,
}

impl Submission {
    /// The select control uses `0` as the "nothing chosen" sentinel.
    pub fn selected_issue_id(&self) -> i64 {
        self.preselected_issue_id.unwrap_or(0)
    }
}

impl Entity for Submission {
    fn id(&self) -> Bson {
        Bson::Int64(self.id)
    }

    fn last_modified(&self) -> i64 {
        self.last_modified
    }
}
