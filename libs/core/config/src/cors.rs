use crate::{env_list_or, ConfigError, FromEnv};

/// Origin that allows every caller
pub const WILDCARD_ORIGIN: &str = "*";

/// Cross-origin configuration
///
/// `CORS_ALLOWED_ORIGINS` is a comma separated allow-list. A list of exactly `*`
/// allows any origin. Defaults to `*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows_any(&self) -> bool {
        matches!(self.allowed_origins.as_slice(), [only] if only == WILDCARD_ORIGIN)
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(env_list_or(
            "CORS_ALLOWED_ORIGINS",
            &[WILDCARD_ORIGIN],
        )))
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::new([WILDCARD_ORIGIN])
    }
}
