//! Health check endpoint
//!
//! Always answers 200. A store that does not answer the ping in time marks the
//! service as degraded instead of down.

use axum::{
    Json, Router,
    extract::State,
    http::{Method, Uri},
    routing::get,
};
use chrono::Utc;
use database::{StorePing, ping_with_timeout};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use utoipa::ToSchema;

pub const HEALTH_PATH: &str = "/healthz";

/// Upper bound for the store ping
pub const PING_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct HealthState {
    probe: Arc<dyn StorePing>,
    timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `up` or `degraded`
    pub status: String,
    pub server: String,
    /// `connected` or `disconnected`
    pub database: String,
    /// RFC 3339
    pub timestamp: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthChecks {
    pub database: CheckResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckResult {
    /// `passed` or `failed`
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create a health check router
pub fn router(probe: Arc<dyn StorePing>) -> Router {
    router_with_timeout(probe, PING_TIMEOUT)
}

fn router_with_timeout(probe: Arc<dyn StorePing>, timeout: Duration) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health_check))
        .with_state(HealthState { probe, timeout })
}

/// Service and store health
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Service",
    responses(
        (status = 200, description = "Service is up or degraded", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<HealthState>,
    method: Method,
    uri: Uri,
) -> Json<HealthResponse> {
    let ping = ping_with_timeout(state.probe.as_ref(), state.timeout).await;

    let response = match ping {
        Ok(()) => {
            info!(
                method = %method,
                path = %uri.path(),
                status = "up",
                database = "connected",
                "health check passed"
            );
            HealthResponse::new("up", "connected", "passed", None)
        }
        Err(e) => {
            warn!(
                method = %method,
                path = %uri.path(),
                status = "degraded",
                database = "disconnected",
                error = %e,
                "health check degraded"
            );
            HealthResponse::new("degraded", "disconnected", "failed", Some(e.to_string()))
        }
    };

    Json(response)
}

impl HealthResponse {
    fn new(status: &str, database: &str, check: &str, error: Option<String>) -> Self {
        Self {
            status: status.to_string(),
            server: "up".to_string(),
            database: database.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            checks: HealthChecks {
                database: CheckResult {
                    status: check.to_string(),
                    error,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::DateTime;
    use database::{DatabaseError, DatabaseResult};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct HealthyStore;

    #[async_trait]
    impl StorePing for HealthyStore {
        async fn ping(&self) -> DatabaseResult<()> {
            Ok(())
        }
    }

    struct DownStore;

    #[async_trait]
    impl StorePing for DownStore {
        async fn ping(&self) -> DatabaseResult<()> {
            Err(DatabaseError::HealthCheckFailed("no primary".to_string()))
        }
    }

    struct HangingStore;

    #[async_trait]
    impl StorePing for HangingStore {
        async fn ping(&self) -> DatabaseResult<()> {
            std::future::pending().await
        }
    }

    async fn check(app: Router) -> (StatusCode, HealthResponse, serde_json::Value) {
        let response = app
            .oneshot(Request::get(HEALTH_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (
            status,
            serde_json::from_slice(&bytes).unwrap(),
            serde_json::from_slice(&bytes).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_healthy_store() {
        let (status, body, raw) = check(router(Arc::new(HealthyStore))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "up");
        assert_eq!(body.server, "up");
        assert_eq!(body.database, "connected");
        assert_eq!(body.checks.database.status, "passed");
        assert!(DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
        assert!(raw["checks"]["database"].get("error").is_none());
    }

    #[tokio::test]
    async fn test_failing_store_is_degraded_not_down() {
        let (status, body, _) = check(router(Arc::new(DownStore))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.database, "disconnected");
        assert_eq!(body.checks.database.status, "failed");
        assert!(body.checks.database.error.unwrap().contains("no primary"));
    }

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let app = router_with_timeout(Arc::new(HangingStore), Duration::from_millis(20));
        let (status, body, _) = check(app).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "degraded");
        assert!(body.checks.database.error.is_some());
    }
}
