//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::{health, version};

/// Service-level endpoints
#[derive(OpenApi)]
#[openapi(
    info(
        title = "List Manager API",
        description = "REST API for managing list items, backed by MongoDB or memory",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8085", description = "Local development server")
    ),
    paths(health::health_check, version::version),
    components(schemas(
        health::HealthResponse,
        health::HealthChecks,
        health::CheckResult,
        version::VersionResponse
    )),
    tags(
        (name = "Service", description = "Health and version")
    )
)]
struct ServiceDoc;

/// Combined OpenAPI documentation for all APIs
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_items::ApiDoc::openapi());
        doc
    }
}
