use async_trait::async_trait;
use mongodb::Client;

use super::connector::ping;
use crate::common::{DatabaseError, DatabaseResult, StorePing};

/// [`StorePing`] backed by a MongoDB client
///
/// Any failure of the `ping` command surfaces as [`DatabaseError::HealthCheckFailed`].
#[derive(Clone, Debug)]
pub struct MongoPing {
    client: Client,
}

impl MongoPing {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorePing for MongoPing {
    async fn ping(&self) -> DatabaseResult<()> {
        ping(&self.client)
            .await
            .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_fails_health_check() {
        let client = Client::with_uri_str("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200")
            .await
            .unwrap();

        let result = MongoPing::new(client).ping().await;
        assert!(matches!(result, Err(DatabaseError::HealthCheckFailed(_))));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_ping_live_server() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        assert!(MongoPing::new(client).ping().await.is_ok());
    }
}
