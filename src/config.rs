// Process configuration, read once at startup

use crate::auth::{HashCost, SigningSecret, DEFAULT_TOKEN_TTL_SECONDS};
use crate::db::PoolSettings;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JWT_SECRET is unset or blank
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    pub jwt_secret: SigningSecret,
    pub token_ttl_seconds: u64,
    pub hash_cost: HashCost,
    pub database_url: Option<String>,
    pub pool: PoolSettings,
    pub host: String,
    pub port: u16,
}

// database_url may carry credentials
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &self.jwt_secret)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("hash_cost", &self.hash_cost)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("pool", &self.pool)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the environment (and `.env`, if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .map(SigningSecret::new)
            .ok_or(ConfigError::MissingSecret)?;

        let defaults = HashCost::default();
        let hash_cost = HashCost {
            memory_kib: parse_or(&lookup, "ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&lookup, "ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&lookup, "ARGON2_PARALLELISM", defaults.parallelism)?,
        };

        let pool_defaults = PoolSettings::default();
        let pool = PoolSettings {
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", pool_defaults.max_connections)?,
            acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                pool_defaults.acquire_timeout.as_secs(),
            )?),
        };

        Ok(Self {
            jwt_secret,
            token_ttl_seconds: parse_or(&lookup, "JWT_TTL_SECONDS", DEFAULT_TOKEN_TTL_SECONDS)?,
            hash_cost,
            database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            pool,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
