//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use warden_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Without `DATABASE_URL` the server runs on in-memory repositories.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            min_connections: env_or("DB_MIN_CONNECTIONS", 2),
            connect_timeout: Duration::from_secs(env_or("DB_CONNECT_TIMEOUT_SECS", 8)),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 8080),
            database,
        }
    }
}
