//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    Database,
    bson::{Document, doc, oid::ObjectId},
};
use tracing::instrument;

use crate::error::{RepositoryError, RepositoryResult};
use crate::repository::{ItemRecord, ItemRepository, UpdateCounts};
use crate::store::{ITEMS_COLLECTION, ItemCollection, ItemDocument, MongoItemCollection, to_bson_datetime};

/// MongoDB implementation of the ItemRepository
pub struct MongoItemRepository<C: ItemCollection = MongoItemCollection> {
    collection: C,
}

impl MongoItemRepository {
    /// Create a new MongoItemRepository on the `items` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoItemRepository::new(&client.database("listmanager"));
    /// ```
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, ITEMS_COLLECTION)
    }

    /// Create a new MongoItemRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: MongoItemCollection::new(db, collection_name),
        }
    }
}

impl<C: ItemCollection> MongoItemRepository<C> {
    /// Repository over any [`ItemCollection`]
    pub fn from_collection(collection: C) -> Self {
        Self { collection }
    }
}

fn parse_id(id: &str) -> RepositoryResult<ObjectId> {
    Ok(ObjectId::parse_str(id)?)
}

#[async_trait]
impl<C: ItemCollection> ItemRepository for MongoItemRepository<C> {
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn create(&self, item: ItemRecord) -> RepositoryResult<ItemRecord> {
        let id = parse_id(&item.id)?;

        self.collection
            .insert_one(ItemDocument::from_record(id, &item))
            .await
            .map_err(RepositoryError::Generic)?;

        tracing::info!(item_id = %item.id, "Item created successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> RepositoryResult<ItemRecord> {
        let oid = parse_id(id)?;

        self.collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(RepositoryError::Generic)?
            .map(ItemRecord::from)
            .ok_or(RepositoryError::NotFound)
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn update(&self, item: ItemRecord) -> RepositoryResult<ItemRecord> {
        let oid = parse_id(&item.id)?;

        let update = doc! {
            "$set": {
                "name": item.name.as_str(),
                "active": item.active,
                "observation": item.observation.as_deref(),
                "updatedAt": to_bson_datetime(item.updated_at),
            }
        };

        let counts = self
            .collection
            .update_one(doc! { "_id": oid }, update)
            .await
            .map_err(RepositoryError::Generic)?;

        if counts.matched == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(item_id = %item.id, "Item updated successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let oid = parse_id(id)?;

        let deleted = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(RepositoryError::Generic)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(item_id = %id, "Item deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<ItemRecord>> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(RepositoryError::Generic)?;

        let documents = cursor.all().await;
        cursor.close().await;

        let documents = documents.map_err(RepositoryError::Generic)?;
        Ok(documents.into_iter().map(ItemRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn bulk_update_active(&self, active: bool) -> RepositoryResult<UpdateCounts> {
        let counts = self
            .collection
            .update_many(doc! {}, bulk_active_pipeline(active, Utc::now()))
            .await
            .map_err(RepositoryError::Generic)?;

        tracing::info!(
            matched = counts.matched,
            modified = counts.modified,
            "Items bulk updated"
        );
        Ok(counts)
    }
}

/// Sets `active` everywhere, touching `updatedAt` only where the flag flips so that
/// a repeated call reports zero modified documents.
fn bulk_active_pipeline(active: bool, now: DateTime<Utc>) -> Vec<Document> {
    vec![doc! {
        "$set": {
            "updatedAt": {
                "$cond": [{ "$ne": ["$active", active] }, to_bson_datetime(now), "$updatedAt"]
            },
            "active": active,
        }
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockItemCollection, MockItemCursor};
    use mockall::predicate;
    use mongodb::bson::Bson;

    const ID: &str = "65a1b2c3d4e5f60718293a4b";

    fn record() -> ItemRecord {
        ItemRecord {
            id: ID.to_string(),
            name: "Coffee".to_string(),
            active: true,
            observation: None,
            created_at: DateTime::default(),
            updated_at: DateTime::default(),
        }
    }

    fn document() -> ItemDocument {
        ItemDocument::from_record(ObjectId::parse_str(ID).unwrap(), &record())
    }

    fn oid_filter() -> mongodb::bson::Document {
        doc! { "_id": ObjectId::parse_str(ID).unwrap() }
    }

    #[tokio::test]
    async fn test_create_inserts_document() {
        let mut collection = MockItemCollection::new();
        collection
            .expect_insert_one()
            .with(predicate::eq(document()))
            .times(1)
            .returning(|_| Ok(()));

        let repo = MongoItemRepository::from_collection(collection);
        assert_eq!(repo.create(record()).await.unwrap(), record());
    }

    #[tokio::test]
    async fn test_invalid_hex_id_never_reaches_store() {
        let repo = MongoItemRepository::from_collection(MockItemCollection::new());

        let mut bad = record();
        bad.id = "xyz".to_string();

        assert!(matches!(
            repo.create(bad.clone()).await,
            Err(RepositoryError::InvalidHexId(_))
        ));
        assert!(matches!(
            repo.get_by_id("xyz").await,
            Err(RepositoryError::InvalidHexId(_))
        ));
        assert!(matches!(
            repo.update(bad).await,
            Err(RepositoryError::InvalidHexId(_))
        ));
        assert!(matches!(
            repo.delete("").await,
            Err(RepositoryError::InvalidHexId(_))
        ));
    }

    #[tokio::test]
    async fn test_get_by_id_maps_missing_to_not_found() {
        let mut collection = MockItemCollection::new();
        collection
            .expect_find_one()
            .with(predicate::eq(oid_filter()))
            .returning(|_| Ok(None));

        let repo = MongoItemRepository::from_collection(collection);
        assert!(matches!(
            repo.get_by_id(ID).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_by_id_returns_record() {
        let mut collection = MockItemCollection::new();
        collection
            .expect_find_one()
            .returning(|_| Ok(Some(document())));

        let repo = MongoItemRepository::from_collection(collection);
        assert_eq!(repo.get_by_id(ID).await.unwrap(), record());
    }

    #[tokio::test]
    async fn test_store_failure_is_generic() {
        let mut collection = MockItemCollection::new();
        collection
            .expect_find_one()
            .returning(|_| Err("connection refused".into()));

        let repo = MongoItemRepository::from_collection(collection);
        let err = repo.get_by_id(ID).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Generic(_)));
    }

    #[tokio::test]
    async fn test_update_sets_fields_and_returns_input() {
        let mut collection = MockItemCollection::new();
        collection
            .expect_update_one()
            .withf(|filter, update| {
                let set = update.get_document("$set").unwrap();
                *filter == oid_filter()
                    && set.get_str("name") == Ok("Coffee")
                    && set.get_bool("active") == Ok(true)
                    && set.contains_key("observation")
                    && set.contains_key("updatedAt")
            })
            .returning(|_, _| {
                Ok(UpdateCounts {
                    matched: 1,
                    modified: 1,
                })
            });

        let repo = MongoItemRepository::from_collection(collection);
        assert_eq!(repo.update(record()).await.unwrap(), record());
    }

    #[tokio::test]
    async fn test_update_zero_matched_is_not_found() {
        let mut collection = MockItemCollection::new();
        collection
            .expect_update_one()
            .returning(|_, _| Ok(UpdateCounts::default()));

        let repo = MongoItemRepository::from_collection(collection);
        assert!(matches!(
            repo.update(record()).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_zero_deleted_is_not_found() {
        let mut collection = MockItemCollection::new();
        collection
            .expect_delete_one()
            .with(predicate::eq(oid_filter()))
            .returning(|_| Ok(0));

        let repo = MongoItemRepository::from_collection(collection);
        assert!(matches!(repo.delete(ID).await, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut collection = MockItemCollection::new();
        collection.expect_delete_one().returning(|_| Ok(1));

        let repo = MongoItemRepository::from_collection(collection);
        assert!(repo.delete(ID).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_closes_cursor_on_success() {
        let mut cursor = MockItemCursor::new();
        cursor
            .expect_all()
            .times(1)
            .returning(|| Ok(vec![document()]));
        cursor.expect_close().times(1).return_const(());

        let mut collection = MockItemCollection::new();
        collection
            .expect_find()
            .with(predicate::eq(doc! {}))
            .return_once(move |_| Ok(Box::new(cursor)));

        let repo = MongoItemRepository::from_collection(collection);
        assert_eq!(repo.list().await.unwrap(), vec![record()]);
    }

    #[tokio::test]
    async fn test_list_closes_cursor_on_decode_error() {
        let mut cursor = MockItemCursor::new();
        cursor
            .expect_all()
            .times(1)
            .returning(|| Err("invalid document".into()));
        cursor.expect_close().times(1).return_const(());

        let mut collection = MockItemCollection::new();
        collection
            .expect_find()
            .return_once(move |_| Ok(Box::new(cursor)));

        let repo = MongoItemRepository::from_collection(collection);
        assert!(matches!(repo.list().await, Err(RepositoryError::Generic(_))));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let mut cursor = MockItemCursor::new();
        cursor.expect_all().returning(|| Ok(Vec::new()));
        cursor.expect_close().return_const(());

        let mut collection = MockItemCollection::new();
        collection
            .expect_find()
            .return_once(move |_| Ok(Box::new(cursor)));

        let repo = MongoItemRepository::from_collection(collection);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_update_active_returns_counts_even_when_zero() {
        let mut collection = MockItemCollection::new();
        collection
            .expect_update_many()
            .withf(|filter, pipeline| {
                filter.is_empty()
                    && pipeline.len() == 1
                    && pipeline[0].get_document("$set").unwrap().get_bool("active") == Ok(false)
            })
            .returning(|_, _| Ok(UpdateCounts::default()));

        let repo = MongoItemRepository::from_collection(collection);
        assert_eq!(
            repo.bulk_update_active(false).await.unwrap(),
            UpdateCounts::default()
        );
    }

    #[tokio::test]
    async fn test_bulk_update_active_twice_only_touches_changed_items() {
        let mut collection = MockItemCollection::new();
        let mut calls = 0;
        collection
            .expect_update_many()
            .times(2)
            .withf(|filter, pipeline| {
                let set = pipeline[0].get_document("$set").unwrap();
                filter.is_empty()
                    && set.get_bool("active") == Ok(true)
                    && set.get_document("updatedAt").unwrap().contains_key("$cond")
            })
            .returning(move |_, _| {
                calls += 1;
                Ok(UpdateCounts {
                    matched: 2,
                    modified: if calls == 1 { 2 } else { 0 },
                })
            });

        let repo = MongoItemRepository::from_collection(collection);
        let first = repo.bulk_update_active(true).await.unwrap();
        let second = repo.bulk_update_active(true).await.unwrap();

        assert_eq!(first, UpdateCounts { matched: 2, modified: 2 });
        assert_eq!(second, UpdateCounts { matched: 2, modified: 0 });
    }

    #[test]
    fn test_bulk_pipeline_keeps_timestamp_of_unchanged_items() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let pipeline = bulk_active_pipeline(false, now);
        let updated_at = pipeline[0]
            .get_document("$set")
            .unwrap()
            .get_document("updatedAt")
            .unwrap();

        assert_eq!(
            updated_at.get_array("$cond").unwrap().clone(),
            vec![
                Bson::Document(doc! { "$ne": ["$active", false] }),
                Bson::DateTime(to_bson_datetime(now)),
                Bson::String("$updatedAt".to_string()),
            ]
        );
    }
}
