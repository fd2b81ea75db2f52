use crate::errors::{is_duplicate_key, AppError};
use crate::repository::query_builder::{PageInfo, PageRequest, PageResult};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use log::{error, info, warn};
use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Persistence gateway over one collection of `T`, addressed by numeric `_id`.
///
/// Filters, sorts and updates use the MongoDB document language
/// (`$set`, `$inc`, `$in`, ...) for every implementation.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, AppError>;
    async fn find_one(&self, filter: Document) -> Result<Option<T>, AppError>;
    async fn find_all(&self, filter: Document, sort: Option<Document>) -> Result<Vec<T>, AppError>;
    async fn insert(&self, entity: &T) -> Result<(), AppError>;
    /// Replaces the stored document with the same `_id`.
    async fn save(&self, id: i64, entity: &T) -> Result<(), AppError>;
    /// Returns the number of modified documents.
    async fn update_one(&self, filter: Document, update: Document) -> Result<u64, AppError>;
    async fn update_many(&self, filter: Document, update: Document) -> Result<u64, AppError>;
    /// Returns the document as it is after the update, `None` when nothing matched.
    async fn find_one_and_update(&self, filter: Document, update: Document) -> Result<Option<T>, AppError>;
    async fn delete_by_id(&self, id: i64) -> Result<u64, AppError>;
    async fn delete_many(&self, filter: Document) -> Result<u64, AppError>;
    async fn count(&self, filter: Document) -> Result<u64, AppError>;
    async fn query_by_page(&self, filter: Document, sort: Option<Document>, page: &PageRequest) -> Result<PageResult<T>, AppError>;
}

/// MongoDB backed repository.
pub struct BaseRepository<T: Send + Sync> {
    pub collection: Collection<T>,
}

impl<T: Send + Sync> BaseRepository<T> {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self { collection: db.collection::<T>(collection_name) }
    }

    /// Creates the declared indexes missing from the collection, compared by name.
    pub async fn ensure_indexes(&self, targets: Vec<IndexModel>) -> Result<(), AppError> {
        let existing: Vec<String> = self
            .collection
            .list_index_names()
            .await
            .or_else(|e| match e.kind.as_ref() {
                // collection not created yet
                mongodb::error::ErrorKind::Command(c) if c.code == 26 => Ok(vec![]),
                _ => Err(e),
            })?;
        for target in targets {
            let name = target.options.as_ref().and_then(|o| o.name.clone()).unwrap_or_default();
            if existing.contains(&name) {
                continue;
            }
            match self.collection.create_index(target.clone()).await {
                Ok(_) => info!("created index {} on {}", name, self.collection.name()),
                Err(e) => {
                    error!("create index {} on {} failed: {:?}", name, self.collection.name(), e);
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }
}

fn map_write_error(e: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&e) {
        warn!("duplicate key rejected: {}", e);
        AppError::DuplicateKey(e.to_string())
    } else {
        AppError::Mongo(e)
    }
}

#[async_trait]
impl<T> Repository<T> for BaseRepository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, AppError> {
        self.find_one(doc! { "_id": id }).await
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>, AppError> {
        Ok(self.collection.find_one(filter).await?)
    }

    async fn find_all(&self, filter: Document, sort: Option<Document>) -> Result<Vec<T>, AppError> {
        let cursor = self.collection.find(filter).sort(sort.unwrap_or_default()).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, entity: &T) -> Result<(), AppError> {
        self.collection.insert_one(entity).await.map_err(map_write_error)?;
        Ok(())
    }

    async fn save(&self, id: i64, entity: &T) -> Result<(), AppError> {
        self.collection.replace_one(doc! { "_id": id }, entity).await.map_err(map_write_error)?;
        Ok(())
    }

    async fn update_one(&self, filter: Document, update: Document) -> Result<u64, AppError> {
        let result = self.collection.update_one(filter, update).await.map_err(map_write_error)?;
        Ok(result.modified_count)
    }

    async fn update_many(&self, filter: Document, update: Document) -> Result<u64, AppError> {
        let result = self.collection.update_many(filter, update).await.map_err(map_write_error)?;
        Ok(result.modified_count)
    }

    async fn find_one_and_update(&self, filter: Document, update: Document) -> Result<Option<T>, AppError> {
        let result = self
            .collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_write_error)?;
        Ok(result)
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, AppError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    async fn delete_many(&self, filter: Document) -> Result<u64, AppError> {
        let result = self.collection.delete_many(filter).await?;
        Ok(result.deleted_count)
    }

    async fn count(&self, filter: Document) -> Result<u64, AppError> {
        Ok(self.collection.count_documents(filter).await?)
    }

    async fn query_by_page(&self, filter: Document, sort: Option<Document>, page: &PageRequest) -> Result<PageResult<T>, AppError> {
        let total = self.collection.count_documents(filter.clone()).await?;
        let cursor = self
            .collection
            .find(filter)
            .sort(sort.unwrap_or_default())
            .skip(page.skip())
            .limit(page.size as i64)
            .await?;
        let items: Vec<T> = cursor.try_collect().await?;
        Ok(PageResult { items, page_info: PageInfo::of(page, total) })
    }
}
