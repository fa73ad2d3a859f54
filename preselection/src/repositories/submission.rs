use std::sync::Arc;

use common::{
    entities::submission::Submission,
    repository::{Repository, RepositoryObject},
};
use mongodb::bson::Bson;

#[derive(Clone)]
pub struct SubmissionRepo(RepositoryObject<Submission>);

impl SubmissionRepo {
    pub fn new(repo: impl Repository<Submission> + 'static) -> Self {
        Self(Arc::new(repo))
    }

    pub async fn find(&self, id: i64) -> anyhow::Result<Option<Submission>> {
        self.0.find("id", &Bson::Int64(id)).await
    }

    pub async fn save(&self, submission: &Submission) -> anyhow::Result<()> {
        self.0.delete("id", &Bson::Int64(submission.id)).await?;
        self.0.insert(submission).await?;
        Ok(())
    }
}
