use core_config::{ConfigError, FromEnv, cors::CorsConfig, env_or_default, server::ServerConfig};
use strum::{Display, EnumString};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Where items are persisted, from `STORE_BACKEND`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    #[default]
    Mongodb,
    Memory,
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub store: StoreBackend,
    pub mongodb: MongoConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_raw = env_or_default("STORE_BACKEND", &StoreBackend::default().to_string());
        let store = store_raw
            .trim()
            .parse::<StoreBackend>()
            .map_err(|_| ConfigError::ParseError {
                key: "STORE_BACKEND".to_string(),
                details: format!("expected 'mongodb' or 'memory', got '{store_raw}'"),
            })?;

        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            cors: CorsConfig::from_env()?,
            store,
            mongodb: MongoConfig::from_env()?,
        })
    }
}
