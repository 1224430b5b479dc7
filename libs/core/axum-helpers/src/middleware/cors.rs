use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::cors::{CorsConfig, WILDCARD_ORIGIN};
use std::collections::HashSet;
use std::sync::Arc;

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, ngrok-skip-browser-warning";

/// Origin allow-list used by the [`cors`] middleware
///
/// Any origin is allowed only when the list is exactly `["*"]`. A `*` mixed with
/// other entries is matched literally.
#[derive(Clone, Debug)]
pub struct CorsPolicy {
    allow_any: bool,
    origins: Arc<HashSet<String>>,
}

impl CorsPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let origins: Vec<String> = origins.into_iter().map(Into::into).collect();
        Self {
            allow_any: matches!(origins.as_slice(), [only] if only == WILDCARD_ORIGIN),
            origins: Arc::new(origins.into_iter().collect()),
        }
    }

    /// Value for `Access-Control-Allow-Origin`, `None` when the origin is not allowed
    pub fn allow_origin(&self, origin: Option<&str>) -> Option<HeaderValue> {
        if self.allow_any {
            return Some(HeaderValue::from_static(WILDCARD_ORIGIN));
        }

        origin
            .filter(|origin| self.origins.contains(*origin))
            .and_then(|origin| HeaderValue::from_str(origin).ok())
    }

    fn apply(&self, origin: Option<&str>, headers: &mut HeaderMap) {
        if let Some(value) = self.allow_origin(origin) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
}

impl From<&CorsConfig> for CorsPolicy {
    fn from(config: &CorsConfig) -> Self {
        Self::new(config.allowed_origins.iter().cloned())
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::from(&CorsConfig::default())
    }
}

/// CORS headers on every response. `OPTIONS` preflights are answered here with an
/// empty 200 and never reach the router.
///
/// ```ignore
/// let app = router.layer(axum::middleware::from_fn_with_state(CorsPolicy::default(), cors));
/// ```
pub async fn cors(State(policy): State<CorsPolicy>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    policy.apply(origin.as_deref(), response.headers_mut());
    response
}
