use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{self, Bson};
use serde::{de::DeserializeOwned, Serialize};

use super::{Entity, Repository};

/// In-memory stand-in for `MongoRepository` used by unit tests. Rows are
/// kept as BSON documents so field lookups behave like the real queries.
pub struct TestRepository<T> {
    _t: std::marker::PhantomData<T>,
    pub db: Mutex<Vec<Bson>>,
}

impl<T> TestRepository<T> {
    pub fn new() -> Self {
        Self {
            _t: std::marker::PhantomData,
            db: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Default for TestRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Repository<T> for TestRepository<T>
where
    T: Entity + Clone + Send + Sync + Serialize + DeserializeOwned,
{
    async fn insert(&self, item: &T) -> anyhow::Result<bool> {
        let mut db = self.db.lock().unwrap();

        let contains = db
            .iter()
            .any(|x| x.as_document().unwrap().get("id") == Some(&item.id()));
        if !contains {
            db.push(bson::to_bson(&item).unwrap());
        }
        Ok(!contains)
    }

    async fn find(&self, field: &str, value: &Bson) -> anyhow::Result<Option<T>> {
        let db = self.db.lock().unwrap();
        Ok(db
            .iter()
            .find(|x| x.as_document().unwrap().get(field) == Some(value))
            .cloned()
            .map(|x| bson::from_bson(x).unwrap()))
    }

    async fn delete(&self, field: &str, value: &Bson) -> anyhow::Result<Option<T>> {
        let mut db = self.db.lock().unwrap();
        let pos = db
            .iter()
            .position(|x| x.as_document().unwrap().get(field) == Some(value));

        Ok(pos.map(|x| bson::from_bson(db.remove(x)).unwrap()))
    }

    async fn find_many(&self, field: &str, value: &Bson) -> anyhow::Result<Vec<T>> {
        let db = self.db.lock().unwrap();
        Ok(db
            .iter()
            .filter(|x| x.as_document().unwrap().get(field) == Some(value))
            .map(|x| bson::from_bson(x.clone()).unwrap())
            .collect())
    }

    async fn find_all(&self, skip: u32, limit: u32) -> anyhow::Result<Vec<T>> {
        let db = self.db.lock().unwrap();
        Ok(db
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .map(|x| bson::from_bson(x.clone()).unwrap())
            .collect())
    }
}
