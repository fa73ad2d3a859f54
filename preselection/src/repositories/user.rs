use std::sync::Arc;

use common::{
    entities::user::User,
    repository::{Repository, RepositoryObject},
};
use mongodb::bson::Bson;

#[derive(Clone)]
pub struct UserRepo(RepositoryObject<User>);

impl UserRepo {
    pub fn new(repo: impl Repository<User> + 'static) -> Self {
        Self(Arc::new(repo))
    }

    pub async fn find(&self, id: i64) -> anyhow::Result<Option<User>> {
        self.0.find("id", &Bson::Int64(id)).await
    }

    pub async fn insert(&self, user: &User) -> anyhow::Result<bool> {
        self.0.insert(user).await
    }
}
