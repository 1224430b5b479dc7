//! In-memory implementation of ItemRepository
//!
//! Identifiers are validated exactly like the MongoDB repository so both backends
//! return the same errors for the same input.

use async_trait::async_trait;
use chrono::Utc;
use database::{DatabaseResult, StorePing};
use mongodb::bson::oid::ObjectId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::{RepositoryError, RepositoryResult};
use crate::repository::{ItemRecord, ItemRepository, UpdateCounts};

/// Process-local item store, cheap to clone
#[derive(Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<BTreeMap<ObjectId, ItemRecord>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

fn parse_id(id: &str) -> RepositoryResult<ObjectId> {
    Ok(ObjectId::parse_str(id)?)
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn create(&self, item: ItemRecord) -> RepositoryResult<ItemRecord> {
        let oid = parse_id(&item.id)?;

        let mut items = self.items.write().await;
        if items.contains_key(&oid) {
            return Err(RepositoryError::generic(format!(
                "duplicate key: {}",
                item.id
            )));
        }
        items.insert(oid, item.clone());

        tracing::info!(item_id = %item.id, "Item created successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> RepositoryResult<ItemRecord> {
        let oid = parse_id(id)?;

        self.items
            .read()
            .await
            .get(&oid)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn update(&self, item: ItemRecord) -> RepositoryResult<ItemRecord> {
        let oid = parse_id(&item.id)?;

        let mut items = self.items.write().await;
        let stored = items.get_mut(&oid).ok_or(RepositoryError::NotFound)?;
        stored.name = item.name.clone();
        stored.active = item.active;
        stored.observation = item.observation.clone();
        stored.updated_at = item.updated_at;

        tracing::info!(item_id = %item.id, "Item updated successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let oid = parse_id(id)?;

        self.items
            .write()
            .await
            .remove(&oid)
            .ok_or(RepositoryError::NotFound)?;

        tracing::info!(item_id = %id, "Item deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<ItemRecord>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn bulk_update_active(&self, active: bool) -> RepositoryResult<UpdateCounts> {
        let now = Utc::now();
        let mut items = self.items.write().await;

        let mut counts = UpdateCounts {
            matched: items.len() as u64,
            modified: 0,
        };
        for item in items.values_mut().filter(|item| item.active != active) {
            item.active = active;
            item.updated_at = now;
            counts.modified += 1;
        }

        tracing::info!(
            matched = counts.matched,
            modified = counts.modified,
            "Items bulk updated"
        );
        Ok(counts)
    }
}

#[async_trait]
impl StorePing for InMemoryItemRepository {
    async fn ping(&self) -> DatabaseResult<()> {
        Ok(())
    }
}
