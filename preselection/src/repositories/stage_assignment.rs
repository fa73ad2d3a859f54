use std::sync::Arc;

use common::{
    entities::stage_assignment::StageAssignment,
    repository::{Repository, RepositoryObject},
};
use mongodb::bson::Bson;

#[derive(Clone)]
pub struct StageAssignmentRepo(RepositoryObject<StageAssignment>);

impl StageAssignmentRepo {
    pub fn new(repo: impl Repository<StageAssignment> + 'static) -> Self {
        Self(Arc::new(repo))
    }

    pub async fn by_submission(&self, submission_id: i64) -> anyhow::Result<Vec<StageAssignment>> {
        self.0
            .find_many("submissionId", &Bson::Int64(submission_id))
            .await
    }

    /// Uniqueness guard for the (submission, user, user group) triple.
    pub async fn exists(
        &self,
        submission_id: i64,
        user_id: i64,
        user_group_id: i64,
    ) -> anyhow::Result<bool> {
        let assignments = self.by_submission(submission_id).await?;
        Ok(assignments
            .iter()
            .any(|a| a.user_id == user_id && a.user_group_id == user_group_id))
    }

    pub async fn insert(&self, assignment: &StageAssignment) -> anyhow::Result<bool> {
        self.0.insert(assignment).await
    }
}
