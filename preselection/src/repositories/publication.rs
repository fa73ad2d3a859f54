use std::sync::Arc;

use common::{
    entities::publication::Publication,
    repository::{Repository, RepositoryObject},
};
use mongodb::bson::Bson;

#[derive(Clone)]
pub struct PublicationRepo(RepositoryObject<Publication>);

impl PublicationRepo {
    pub fn new(repo: impl Repository<Publication> + 'static) -> Self {
        Self(Arc::new(repo))
    }

    /// The submission's current publication.
    pub async fn by_submission(&self, submission_id: i64) -> anyhow::Result<Option<Publication>> {
        self.0
            .find("submissionId", &Bson::Int64(submission_id))
            .await
    }

    pub async fn update(&self, publication: &Publication) -> anyhow::Result<()> {
        self.0.delete("id", &Bson::Int64(publication.id)).await?;
        self.0.insert(publication).await?;
        Ok(())
    }

    pub async fn insert(&self, publication: &Publication) -> anyhow::Result<bool> {
        self.0.insert(publication).await
    }
}
