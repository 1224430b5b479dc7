//! Narrow view of the MongoDB driver used by [`crate::mongodb::MongoItemRepository`].
//!
//! Only the calls the repository makes are exposed, so the repository can be driven
//! by mocks without a server.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Cursor, Database,
    bson::{self, Document, oid::ObjectId},
};
use serde::{Deserialize, Serialize};

use crate::error::BoxError;
use crate::repository::{ItemRecord, UpdateCounts};

/// Collection the items live in
pub const ITEMS_COLLECTION: &str = "items";

pub type StoreResult<T> = Result<T, BoxError>;

/// Stored form of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<bson::DateTime>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<bson::DateTime>,
}

impl ItemDocument {
    pub fn from_record(id: ObjectId, record: &ItemRecord) -> Self {
        Self {
            id,
            name: record.name.clone(),
            active: record.active,
            observation: record.observation.clone(),
            created_at: Some(to_bson_datetime(record.created_at)),
            updated_at: Some(to_bson_datetime(record.updated_at)),
        }
    }
}

impl From<ItemDocument> for ItemRecord {
    fn from(document: ItemDocument) -> Self {
        Self {
            id: document.id.to_hex(),
            name: document.name,
            active: document.active,
            observation: document.observation,
            created_at: from_bson_datetime(document.created_at),
            updated_at: from_bson_datetime(document.updated_at),
        }
    }
}

pub(crate) fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

/// Missing timestamps read back as the Unix epoch
fn from_bson_datetime(value: Option<bson::DateTime>) -> DateTime<Utc> {
    value
        .and_then(|dt| DateTime::from_timestamp_millis(dt.timestamp_millis()))
        .unwrap_or_default()
}

/// Single-collection operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemCollection: Send + Sync {
    async fn insert_one(&self, document: ItemDocument) -> StoreResult<()>;

    async fn find_one(&self, filter: Document) -> StoreResult<Option<ItemDocument>>;

    async fn update_one(&self, filter: Document, update: Document) -> StoreResult<UpdateCounts>;

    /// Apply an aggregation pipeline to every match
    async fn update_many(
        &self,
        filter: Document,
        pipeline: Vec<Document>,
    ) -> StoreResult<UpdateCounts>;

    /// Number of deleted documents
    async fn delete_one(&self, filter: Document) -> StoreResult<u64>;

    async fn find(&self, filter: Document) -> StoreResult<Box<dyn ItemCursor>>;
}

/// Server-side cursor over [`ItemDocument`]s
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemCursor: Send {
    /// Drain the remaining documents
    async fn all(&mut self) -> StoreResult<Vec<ItemDocument>>;

    /// Release the cursor. Idempotent.
    async fn close(&mut self);
}

/// [`ItemCollection`] backed by a driver collection
#[derive(Clone, Debug)]
pub struct MongoItemCollection {
    inner: Collection<ItemDocument>,
}

impl MongoItemCollection {
    pub fn new(db: &Database, name: &str) -> Self {
        Self {
            inner: db.collection::<ItemDocument>(name),
        }
    }
}

#[async_trait]
impl ItemCollection for MongoItemCollection {
    async fn insert_one(&self, document: ItemDocument) -> StoreResult<()> {
        self.inner.insert_one(document).await?;
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> StoreResult<Option<ItemDocument>> {
        Ok(self.inner.find_one(filter).await?)
    }

    async fn update_one(&self, filter: Document, update: Document) -> StoreResult<UpdateCounts> {
        let result = self.inner.update_one(filter, update).await?;
        Ok(UpdateCounts {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn update_many(
        &self,
        filter: Document,
        pipeline: Vec<Document>,
    ) -> StoreResult<UpdateCounts> {
        let result = self.inner.update_many(filter, pipeline).await?;
        Ok(UpdateCounts {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, filter: Document) -> StoreResult<u64> {
        Ok(self.inner.delete_one(filter).await?.deleted_count)
    }

    async fn find(&self, filter: Document) -> StoreResult<Box<dyn ItemCursor>> {
        let cursor = self.inner.find(filter).await?;
        Ok(Box::new(MongoItemCursor {
            inner: Some(cursor),
        }))
    }
}

/// Driver cursor, killed on the server when dropped
struct MongoItemCursor {
    inner: Option<Cursor<ItemDocument>>,
}

#[async_trait]
impl ItemCursor for MongoItemCursor {
    async fn all(&mut self) -> StoreResult<Vec<ItemDocument>> {
        match self.inner.as_mut() {
            Some(cursor) => {
                let documents: Vec<ItemDocument> = cursor.try_collect().await?;
                Ok(documents)
            }
            None => Err("cursor already closed".into()),
        }
    }

    async fn close(&mut self) {
        self.inner.take();
    }
}
