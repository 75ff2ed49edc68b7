//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use signup_infra::HashCost;
use signup_infra::database::DatabaseConfig;
use signup_infra::storage::DEFAULT_UPLOAD_DIR;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub upload_dir: String,
    /// Deadline applied to every user store call.
    pub store_timeout: Duration,
    /// Upper bound on a whole multipart form.
    pub max_form_bytes: usize,
    pub hash_cost: HashCost,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            config.max_connections = parse_or("DB_MAX_CONNECTIONS", config.max_connections);
            config.min_connections = parse_or("DB_MIN_CONNECTIONS", config.min_connections);
            config
        });

        let defaults = HashCost::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            database,
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            store_timeout: Duration::from_secs(parse_or("STORE_TIMEOUT_SECS", 5)),
            max_form_bytes: parse_or("MAX_FORM_BYTES", 10 * 1024 * 1024),
            hash_cost: HashCost {
                memory_kib: parse_or("HASH_MEMORY_KIB", defaults.memory_kib),
                iterations: parse_or("HASH_ITERATIONS", defaults.iterations),
                parallelism: parse_or("HASH_PARALLELISM", defaults.parallelism),
            },
        }
    }
}

/// Parse an env var, falling back to `default` when unset or malformed.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
