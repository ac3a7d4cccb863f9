//! # Database Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, or built in code.
//!
//! ## Environment
//! | Variable                   | Default                          |
//! |----------------------------|----------------------------------|
//! | `DATABASE_URI`             | `sqlite://catalog.db?mode=rwc`   |
//! | `DATABASE_MAX_CONNECTIONS` | `5`                              |

use std::env;
use std::time::Duration;

/// Environment variable selecting the database.
pub const DATABASE_URI_VAR: &str = "DATABASE_URI";

/// Environment variable overriding the pool size.
pub const MAX_CONNECTIONS_VAR: &str = "DATABASE_MAX_CONNECTIONS";

/// Used when `DATABASE_URI` is not set.
pub const DEFAULT_DATABASE_URI: &str = "sqlite://catalog.db?mode=rwc";

/// URI of a private in-memory database.
pub const IN_MEMORY_URI: &str = "sqlite::memory:";

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("sqlite://./data/catalog.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite connection URI.
    pub database_uri: String,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps connections
    /// forever, which an in-memory database needs to survive.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration for the given URI.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = DbConfig::new("sqlite://./catalog.db?mode=rwc");
    /// ```
    pub fn new(uri: impl Into<String>) -> Self {
        DbConfig {
            database_uri: uri.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let uri = lookup(DATABASE_URI_VAR)
            .filter(|uri| !uri.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URI.to_string());

        let mut config = DbConfig::new(uri);
        if config.is_in_memory() {
            config = config.memory_pool();
        }

        if let Some(raw) = lookup(MAX_CONNECTIONS_VAR) {
            let max: u32 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(MAX_CONNECTIONS_VAR.to_string()))?;
            if max == 0 {
                return Err(ConfigError::InvalidValue(MAX_CONNECTIONS_VAR.to_string()));
            }
            // Each connection to a private memory database sees its own empty database
            if max > 1 && config.is_in_memory() && !config.is_shared_cache() {
                return Err(ConfigError::InvalidValue(MAX_CONNECTIONS_VAR.to_string()));
            }
            config = config.max_connections(max);
        }

        Ok(config)
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Isolated database, dropped with the pool
    /// ```
    pub fn in_memory() -> Self {
        DbConfig::new(IN_MEMORY_URI).memory_pool()
    }

    /// Checks if this configuration targets an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        is_memory_uri(&self.database_uri)
    }

    /// Checks if the URI asks for a shared cache, letting several
    /// connections see one memory database.
    pub fn is_shared_cache(&self) -> bool {
        self.database_uri.contains("cache=shared")
    }

    /// Pool settings that keep a memory database alive: one connection,
    /// never reaped. The URI is left as configured.
    fn memory_pool(self) -> Self {
        DbConfig {
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            ..self
        }
    }
}

fn is_memory_uri(uri: &str) -> bool {
    uri.contains(":memory:") || uri.contains("mode=memory")
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("sqlite://test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_defaults_without_env() {
        let config = DbConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_uri, DEFAULT_DATABASE_URI);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_uri_from_env() {
        let config = DbConfig::from_lookup(lookup(&[
            (DATABASE_URI_VAR, "sqlite:///var/lib/catalog.db"),
            (MAX_CONNECTIONS_VAR, "8"),
        ]))
        .unwrap();
        assert_eq!(config.database_uri, "sqlite:///var/lib/catalog.db");
        assert_eq!(config.max_connections, 8);
    }

    #[test]
    fn test_memory_uri_keeps_single_connection() {
        let config = DbConfig::from_lookup(lookup(&[(DATABASE_URI_VAR, "sqlite::memory:")])).unwrap();
        assert!(config.is_in_memory());
        assert_eq!(config.database_uri, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);
        assert!(config.idle_timeout.is_none());

        let err = DbConfig::from_lookup(lookup(&[
            (DATABASE_URI_VAR, "sqlite::memory:"),
            (MAX_CONNECTIONS_VAR, "8"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_shared_cache_memory_uri_is_kept() {
        let uri = "sqlite:file:catalog?mode=memory&cache=shared";
        let config = DbConfig::from_lookup(lookup(&[(DATABASE_URI_VAR, uri)])).unwrap();
        assert_eq!(config.database_uri, uri);
        assert!(config.is_in_memory());
        assert!(config.is_shared_cache());
        assert_eq!(config.max_connections, 1);
        assert!(config.idle_timeout.is_none());

        let config = DbConfig::from_lookup(lookup(&[
            (DATABASE_URI_VAR, uri),
            (MAX_CONNECTIONS_VAR, "4"),
        ]))
        .unwrap();
        assert_eq!(config.database_uri, uri);
        assert_eq!(config.max_connections, 4);
        assert!(config.idle_timeout.is_none());
    }

    #[test]
    fn test_in_memory_uses_private_database() {
        let config = DbConfig::in_memory();
        assert_eq!(config.database_uri, IN_MEMORY_URI);
        assert!(!config.is_shared_cache());
        assert_eq!(config.max_connections, 1);
    }

    #[test]
    fn test_invalid_pool_size() {
        let err = DbConfig::from_lookup(lookup(&[(MAX_CONNECTIONS_VAR, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        assert!(DbConfig::from_lookup(lookup(&[(MAX_CONNECTIONS_VAR, "0")])).is_err());
    }
}
