//! Content API operations over one document kind.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Document, Validate};
use crate::error::DomainError;
use crate::ports::{AdminIdentity, ContentStore};

/// List/get/create/update/delete for one entity kind.
///
/// Reads are public. Writes take an [`AdminIdentity`]; the HTTP layer gets
/// one only from [`AuthGate::authorize`](super::AuthGate::authorize), so an
/// unauthorized request never reaches the store.
pub struct ContentService<T: Document> {
    store: Arc<dyn ContentStore<T>>,
}

impl<T: Document> Clone for ContentService<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<T: Document> ContentService<T> {
    pub fn new(store: Arc<dyn ContentStore<T>>) -> Self {
        Self { store }
    }

    /// Every document, newest first. Empty when nothing has been published.
    pub async fn list(&self) -> Result<Vec<T>, DomainError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<T, DomainError> {
        let key = parse_id::<T>(id)?;
        self.store
            .find(key)
            .await?
            .ok_or_else(|| DomainError::not_found(T::KIND, id))
    }

    pub async fn create(&self, admin: &AdminIdentity, draft: T::Draft) -> Result<T, DomainError> {
        draft.validate()?;

        let document = self.store.insert(draft).await?;
        tracing::info!(
            kind = T::KIND,
            id = %document.id(),
            admin = %admin.username,
            "Content created"
        );
        Ok(document)
    }

    pub async fn update(
        &self,
        admin: &AdminIdentity,
        id: &str,
        patch: T::Patch,
    ) -> Result<T, DomainError> {
        patch.validate()?;
        let key = parse_id::<T>(id)?;

        let document = self
            .store
            .update(key, patch)
            .await?
            .ok_or_else(|| DomainError::not_found(T::KIND, id))?;
        tracing::info!(kind = T::KIND, id = %key, admin = %admin.username, "Content updated");
        Ok(document)
    }

    pub async fn delete(&self, admin: &AdminIdentity, id: &str) -> Result<Uuid, DomainError> {
        let key = parse_id::<T>(id)?;

        if !self.store.delete(key).await? {
            return Err(DomainError::not_found(T::KIND, id));
        }
        tracing::info!(kind = T::KIND, id = %key, admin = %admin.username, "Content deleted");
        Ok(key)
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.store.count().await?)
    }
}

/// A malformed id cannot name any document, so it is reported as not found.
fn parse_id<T: Document>(id: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(id.trim()).map_err(|_| DomainError::not_found(T::KIND, id))
}
