use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const VERSION_PATH: &str = "/_app/version.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    #[schema(example = "1.0.0")]
    pub version: String,
}

pub fn router() -> Router {
    Router::new().route(VERSION_PATH, get(version))
}

/// Running service version
#[utoipa::path(
    get,
    path = "/_app/version.json",
    tag = "Service",
    responses(
        (status = 200, description = "Service version", body = VersionResponse)
    )
)]
pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_version_body() {
        let response = router()
            .oneshot(Request::get(VERSION_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: VersionResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.version, "1.0.0");
    }
}
