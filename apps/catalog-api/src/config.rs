//! Catalog API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use catalog_core::DEFAULT_PAGE_SIZE;
use catalog_db::DbConfig;

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface the HTTP server binds to
    pub http_host: String,

    /// HTTP server port
    pub http_port: u16,

    /// MySQL connection settings
    pub database: DbConfig,

    /// Default `size` for `GET /products`
    pub list_per_page: u64,

    /// Answer lookup misses with 404 instead of `{"data": []}`
    pub strict_lookups: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let connect_timeout_ms: u64 = parse(&lookup, "DB_CONNECT_TIMEOUT_MS", 60_000)?;

        let database = DbConfig::new(text("DB_HOST", "localhost"), text("DB_NAME", "catalog"))
            .port(parse(&lookup, "DB_PORT", 3306)?)
            .credentials(text("DB_USER", "root"), text("DB_PASSWORD", ""))
            .connect_timeout(Duration::from_millis(connect_timeout_ms))
            .max_connections(parse(&lookup, "DB_MAX_CONNECTIONS", 10)?);

        let config = ApiConfig {
            http_host: text("HTTP_HOST", "0.0.0.0"),
            http_port: parse(&lookup, "HTTP_PORT", 3000)?,
            database,
            list_per_page: parse(&lookup, "LIST_PER_PAGE", DEFAULT_PAGE_SIZE)?,
            strict_lookups: parse(&lookup, "STRICT_LOOKUPS", false)?,
        };

        if config.list_per_page == 0 {
            return Err(ConfigError::InvalidValue("LIST_PER_PAGE".to_string()));
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn parse<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.user, "root");
        assert_eq!(config.database.password, "");
        assert_eq!(config.database.database, "catalog");
        assert_eq!(config.database.connect_timeout, Duration::from_secs(60));
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.list_per_page, 10);
        assert!(!config.strict_lookups);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HTTP_PORT", "8080"),
            ("DB_HOST", "mysql"),
            ("DB_USER", "catalog"),
            ("DB_PASSWORD", "secret"),
            ("DB_CONNECT_TIMEOUT_MS", "5000"),
            ("LIST_PER_PAGE", "25"),
            ("STRICT_LOOKUPS", "true"),
        ])
        .unwrap();

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.database.host, "mysql");
        assert_eq!(config.database.user, "catalog");
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.database.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.list_per_page, 25);
        assert!(config.strict_lookups);
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("HTTP_PORT", "http")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for HTTP_PORT");

        let err = load(&[("LIST_PER_PAGE", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == "LIST_PER_PAGE"));

        assert!(load(&[("STRICT_LOOKUPS", "yes")]).is_err());
    }
}
