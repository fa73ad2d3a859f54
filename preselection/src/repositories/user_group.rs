use std::sync::Arc;

use common::{
    entities::user_group::UserGroup,
    repository::{Repository, RepositoryObject},
};
use mongodb::bson::Bson;

#[derive(Clone)]
pub struct UserGroupRepo(RepositoryObject<UserGroup>);

impl UserGroupRepo {
    pub fn new(repo: impl Repository<UserGroup> + 'static) -> Self {
        Self(Arc::new(repo))
    }

    pub async fn by_context(&self, context_id: i64) -> anyhow::Result<Vec<UserGroup>> {
        self.0.find_many("contextId", &Bson::Int64(context_id)).await
    }

    pub async fn insert(&self, group: &UserGroup) -> anyhow::Result<bool> {
        self.0.insert(group).await
    }
}
