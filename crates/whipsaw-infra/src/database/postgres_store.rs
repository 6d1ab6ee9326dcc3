//! PostgreSQL content stores.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
};
use uuid::Uuid;

use whipsaw_core::domain::{BlogDraft, BlogPatch, BlogPost, Document, WorkDraft, WorkItem, WorkPatch};
use whipsaw_core::error::RepoError;
use whipsaw_core::ports::ContentStore;

use super::entity::{blog, work};

/// Connection-class failures mean the store is unavailable; everything else
/// is a failed query.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

/// Implements [`ContentStore`] for a store type over one SeaORM entity.
///
/// Updates are read-modify-write on a single row; concurrent writers to
/// the same id resolve as last write wins.
macro_rules! postgres_store {
    (
        $(#[$meta:meta])*
        $store:ident, $doc:ty, $draft:ty, $patch:ty, $entity:ident, $sort:ident
    ) => {
        $(#[$meta])*
        pub struct $store {
            db: DbConn,
        }

        impl $store {
            pub fn new(db: DbConn) -> Self {
                Self { db }
            }
        }

        #[async_trait]
        impl ContentStore<$doc> for $store {
            async fn insert(&self, draft: $draft) -> Result<$doc, RepoError> {
                let document = <$doc>::create(draft);
                let model = $entity::ActiveModel::from(document)
                    .insert(&self.db)
                    .await
                    .map_err(map_db_err)?;
                Ok(model.into())
            }

            async fn find(&self, id: Uuid) -> Result<Option<$doc>, RepoError> {
                let model = $entity::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(map_db_err)?;
                Ok(model.map(Into::into))
            }

            async fn list_all(&self) -> Result<Vec<$doc>, RepoError> {
                let models = $entity::Entity::find()
                    .order_by_desc($entity::Column::$sort)
                    .all(&self.db)
                    .await
                    .map_err(map_db_err)?;
                Ok(models.into_iter().map(Into::into).collect())
            }

            async fn update(&self, id: Uuid, patch: $patch) -> Result<Option<$doc>, RepoError> {
                let Some(mut document) = self.find(id).await? else {
                    return Ok(None);
                };
                document.apply(patch);

                match $entity::ActiveModel::from(document).update(&self.db).await {
                    Ok(model) => Ok(Some(model.into())),
                    // deleted between the read and the write
                    Err(DbErr::RecordNotUpdated) => Ok(None),
                    Err(e) => Err(map_db_err(e)),
                }
            }

            async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
                let result = $entity::Entity::delete_by_id(id)
                    .exec(&self.db)
                    .await
                    .map_err(map_db_err)?;
                Ok(result.rows_affected > 0)
            }

            async fn count(&self) -> Result<u64, RepoError> {
                $entity::Entity::find()
                    .count(&self.db)
                    .await
                    .map_err(map_db_err)
            }
        }
    };
}

postgres_store!(
    /// Blog posts in the `blogs` table, listed by `created_at`.
    PostgresBlogStore, BlogPost, BlogDraft, BlogPatch, blog, CreatedAt
);

postgres_store!(
    /// Work items in the `work` table, listed by `date`.
    PostgresWorkStore, WorkItem, WorkDraft, WorkPatch, work, Date
);
