use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Document;
use crate::error::RepoError;

/// Content store trait - one collection of documents keyed by id.
///
/// The store assigns ids and timestamps but does not enforce business
/// rules; required-field validation happens in the content service.
#[async_trait]
pub trait ContentStore<T: Document>: Send + Sync {
    /// Build a document from the draft and persist it.
    async fn insert(&self, draft: T::Draft) -> Result<T, RepoError>;

    /// Find a document by its id.
    async fn find(&self, id: Uuid) -> Result<Option<T>, RepoError>;

    /// All documents, newest first.
    async fn list_all(&self) -> Result<Vec<T>, RepoError>;

    /// Apply a patch. Returns `None` when no document has this id.
    async fn update(&self, id: Uuid, patch: T::Patch) -> Result<Option<T>, RepoError>;

    /// Hard-delete a document. Returns `false` when no document has this id.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}
