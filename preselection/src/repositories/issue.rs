use std::sync::Arc;

use common::{
    entities::issue::Issue,
    repository::{Repository, RepositoryObject},
};
use mongodb::bson::Bson;

#[derive(Clone)]
pub struct IssueRepo(RepositoryObject<Issue>);

impl IssueRepo {
    pub fn new(repo: impl Repository<Issue> + 'static) -> Self {
        Self(Arc::new(repo))
    }

    pub async fn find(&self, id: i64) -> anyhow::Result<Option<Issue>> {
        self.0.find("id", &Bson::Int64(id)).await
    }

    /// Unpublished issues of a context, in repository order.
    pub async fn unpublished(&self, context_id: i64) -> anyhow::Result<Vec<Issue>> {
        let issues = self.0.find_many("contextId", &Bson::Int64(context_id)).await?;
        Ok(issues.into_iter().filter(|issue| !issue.published).collect())
    }

    /// Replace-style save, keyed by the issue id.
    pub async fn save(&self, issue: &Issue) -> anyhow::Result<()> {
        self.0.delete("id", &Bson::Int64(issue.id)).await?;
        self.0.insert(issue).await?;
        Ok(())
    }
}
