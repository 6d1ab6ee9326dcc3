//! In-memory content store - used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use whipsaw_core::domain::Document;
use whipsaw_core::error::RepoError;
use whipsaw_core::ports::ContentStore;

/// In-memory document collection using a HashMap behind an async RwLock.
///
/// Every operation takes the lock once, so a single write is atomic.
/// Note: Data is lost on process restart.
pub struct InMemoryContentStore<T: Document> {
    documents: RwLock<HashMap<Uuid, T>>,
}

impl<T: Document> InMemoryContentStore<T> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Document> Default for InMemoryContentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> ContentStore<T> for InMemoryContentStore<T> {
    async fn insert(&self, draft: T::Draft) -> Result<T, RepoError> {
        let mut documents = self.documents.write().await;

        let document = T::create(draft);
        documents.insert(document.id(), document.clone());
        Ok(document)
    }

    async fn find(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let documents = self.documents.read().await;
        Ok(documents.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<T>, RepoError> {
        let documents = self.documents.read().await;
        let mut all: Vec<T> = documents.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(all)
    }

    async fn update(&self, id: Uuid, patch: T::Patch) -> Result<Option<T>, RepoError> {
        let mut documents = self.documents.write().await;
        Ok(documents.get_mut(&id).map(|document| {
            document.apply(patch);
            document.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut documents = self.documents.write().await;
        Ok(documents.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.documents.read().await.len() as u64)
    }
}
