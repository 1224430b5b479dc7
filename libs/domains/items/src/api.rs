//! Wire models for the items endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::Item;
use crate::repository::UpdateCounts;

/// Item as sent and received over HTTP
///
/// Every field may be omitted on input. `id` is ignored on create and required on
/// update; missing timestamps decode to the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiItem {
    #[serde(default)]
    #[schema(example = "65a1b2c3d4e5f60718293a4b")]
    pub id: String,
    #[serde(default)]
    #[schema(example = "Coffee")]
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ApiItem {
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

impl From<ApiItem> for Item {
    fn from(item: ApiItem) -> Self {
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

/// `?id=` of the single-item endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Item ID
    #[serde(default)]
    pub id: String,
}

/// Body of `PUT /items/active`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct BulkActiveRequest {
    pub active: bool,
}

/// Outcome of a bulk update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkActiveResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateCounts> for BulkActiveResponse {
    fn from(counts: UpdateCounts) -> Self {
        Self {
            matched_count: counts.matched,
            modified_count: counts.modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_without_id_or_timestamps() {
        let item: ApiItem = serde_json::from_value(json!({
            "name": "Milk",
            "active": true
        }))
        .unwrap();

        assert!(item.id.is_empty());
        assert!(item.observation.is_none());
        assert_eq!(item.created_at, DateTime::<Utc>::default());
        assert_eq!(item.updated_at.timestamp(), 0);
    }

    #[test]
    fn test_encode_uses_camel_case_and_omits_null_observation() {
        let value = serde_json::to_value(ApiItem::from(Item::new("Milk", false))).unwrap();

        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
        assert!(value.get("observation").is_none());
    }

    #[test]
    fn test_bulk_response_field_names() {
        let body = BulkActiveResponse::from(UpdateCounts {
            matched: 3,
            modified: 0,
        });

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "matchedCount": 3, "modifiedCount": 0 })
        );
    }
}
