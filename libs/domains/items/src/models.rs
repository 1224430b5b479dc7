use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

/// Item entity
///
/// `id` is a 24-character lowercase hex string, the textual form of a 12-byte
/// object id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub observation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Fresh item with a generated id; both timestamps set to now
    pub fn new(name: impl Into<String>, active: bool) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.into(),
            active,
            observation: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_observation(mut self, observation: Option<String>) -> Self {
        self.observation = observation;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True only for a literal empty id. `"   "` is not empty.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Refresh `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// New unique item id.
///
/// Uses the store's object id generator (timestamp, per-process random value and
/// counter), which cannot fail, so there is no fallback path.
pub fn generate_id() -> String {
    ObjectId::new().to_hex()
}
