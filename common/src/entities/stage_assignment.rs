use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};

use crate::{default_timestamp, repository::Entity};

/// Binds a user, under a user group, to a submission's workflow. The only
/// entity this service creates; at most one row may exist per
/// (submission, user, user group) triple.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StageAssignment {
    pub id: ObjectId,
    pub submission_id: i64,
    pub user_id: i64,
    pub user_group_id: i64,
    pub date_assigned: i64,
    pub recommend_only: bool,
    pub can_change_metadata: bool,
    #[serde(default = "default_timestamp")]
    pub last_modified: i64,
}

impl StageAssignment {
    pub fn new(submission_id: i64, user_id: i64, user_group_id: i64) -> Self {
        let now = default_timestamp();
        Self {
            id: ObjectId::new(),
            submission_id,
            user_id,
            user_group_id,
            date_assigned: now,
            recommend_only: false,
            can_change_metadata: true,
            last_modified: now,
        }
    }
}

impl Entity for StageAssignment {
    fn id(&self) -> Bson {
        Bson::ObjectId(self.id)
    }

    fn last_modified(&self) -> i64 {
        self.last_modified
    }
}
