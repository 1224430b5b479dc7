use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::RepositoryResult;
use crate::models::Item;

/// Persistence projection of an [`Item`].
///
/// The id stays a string here; each backend maps it to its native identifier and
/// rejects ids it cannot represent with `InvalidHexId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub observation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            active: item.active,
            observation: item.observation,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            active: record.active,
            observation: record.observation,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Matched and modified document counts of an update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateCounts {
    pub matched: u64,
    pub modified: u64,
}

/// Repository trait for Item persistence
///
/// Implementations: [`crate::mongodb::MongoItemRepository`] and
/// [`crate::memory::InMemoryItemRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert an item, returning it as given
    async fn create(&self, item: ItemRecord) -> RepositoryResult<ItemRecord>;

    /// Get an item by ID, `NotFound` when absent
    async fn get_by_id(&self, id: &str) -> RepositoryResult<ItemRecord>;

    /// Overwrite name, active, observation and updated_at.
    ///
    /// Returns the input record, not a re-read of the stored one.
    async fn update(&self, item: ItemRecord) -> RepositoryResult<ItemRecord>;

    /// Delete an item by ID, `NotFound` when nothing was deleted
    async fn delete(&self, id: &str) -> RepositoryResult<()>;

    /// All stored items
    async fn list(&self) -> RepositoryResult<Vec<ItemRecord>>;

    /// Set `active` on every item. Zero matches is not an error.
    async fn bulk_update_active(&self, active: bool) -> RepositoryResult<UpdateCounts>;
}
