//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ServiceError, ServiceResult};
use crate::models::Item;
use crate::repository::{ItemRepository, UpdateCounts};

/// Item service providing business logic operations
///
/// Enforces the update rules and reclassifies every repository error as a
/// [`ServiceError`]. It knows nothing about the concrete store.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new item
    ///
    /// The caller's id and timestamps are discarded; a fresh identity is generated.
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: Item) -> ServiceResult<Item> {
        let item = Item::new(input.name, input.active).with_observation(input.observation);
        let created = self.repository.create(item.into()).await?;
        Ok(created.into())
    }

    /// Get an item by ID
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: &str) -> ServiceResult<Item> {
        Ok(self.repository.get_by_id(id).await?.into())
    }

    /// List all items
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ServiceResult<Vec<Item>> {
        let records = self.repository.list().await?;
        Ok(records.into_iter().map(Item::from).collect())
    }

    /// Update an existing item
    ///
    /// Rejects an item without id, then confirms the item exists before writing.
    #[instrument(skip(self, input), fields(item_id = %input.id))]
    pub async fn update_item(&self, input: Item) -> ServiceResult<Item> {
        if input.is_empty() {
            return Err(ServiceError::empty_item());
        }

        let existing = self.repository.get_by_id(&input.id).await?;

        let mut item = input;
        item.created_at = existing.created_at;
        item.touch();

        let updated = self.repository.update(item.into()).await?;
        Ok(updated.into())
    }

    /// Delete an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: &str) -> ServiceResult<()> {
        Ok(self.repository.delete(id).await?)
    }

    /// Set the active flag on every item
    #[instrument(skip(self))]
    pub async fn bulk_update_active(&self, active: bool) -> ServiceResult<UpdateCounts> {
        Ok(self.repository.bulk_update_active(active).await?)
    }
}
