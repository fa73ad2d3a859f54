use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

use crate::{default_timestamp, repository::Entity};

/// The version of a submission that eventually lands in an issue. Only
/// `issue_id` is written by this service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: i64,
    pub submission_id: i64,
    pub issue_id: Option<i64>,
    #[serde(default = "default_timestamp")]
    pub last_modified: i64,
}

impl Entity for Publication {
    fn id(&self) -> Bson {
        Bson::Int64(self.id)
    }

    fn last_modified(&self) -> i64 {
        self.last_modified
    }
}
