use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::{DatabaseError, DatabaseResult};

/// Liveness probe for a backing store
#[async_trait]
pub trait StorePing: Send + Sync {
    /// Round-trip to the store, `Ok(())` when it answered
    async fn ping(&self) -> DatabaseResult<()>;
}

#[async_trait]
impl<T: StorePing + ?Sized> StorePing for Arc<T> {
    async fn ping(&self) -> DatabaseResult<()> {
        (**self).ping().await
    }
}

/// Ping with an upper bound, a late answer counts as a failure
pub async fn ping_with_timeout<P>(probe: &P, timeout: Duration) -> DatabaseResult<()>
where
    P: StorePing + ?Sized,
{
    match tokio::time::timeout(timeout, probe.ping()).await {
        Ok(result) => result,
        Err(_) => Err(DatabaseError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowPing;

    #[async_trait]
    impl StorePing for SlowPing {
        async fn ping(&self) -> DatabaseResult<()> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    struct FailingPing;

    #[async_trait]
    impl StorePing for FailingPing {
        async fn ping(&self) -> DatabaseResult<()> {
            Err(DatabaseError::HealthCheckFailed("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_ping_with_timeout_expires() {
        let timeout = Duration::from_millis(20);
        let result = ping_with_timeout(&SlowPing, timeout).await;
        assert!(matches!(result, Err(DatabaseError::Timeout(d)) if d == timeout));
    }

    #[tokio::test]
    async fn test_ping_with_timeout_propagates_failure() {
        let probe: Arc<dyn StorePing> = Arc::new(FailingPing);
        let err = ping_with_timeout(&probe, Duration::from_secs(10))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
