//! Runtime configuration read from the environment.

use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown storage backend `{0}` (expected `postgres` or `memory`)")]
pub struct UnknownBackend(String);

impl FromStr for StorageBackend {
    type Err = UnknownBackend;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// Required by the postgres backend.
    pub database_url: Option<String>,
    pub pool_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            storage: StorageBackend::default(),
            database_url: None,
            pool_size: 10,
        }
    }
}

impl AppConfig {
    /// Overrides defaults with whatever is set in the process environment.
    /// `main` loads `.env` into it beforehand.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = parse(&lookup, "PORT") {
            config.port = port;
        }
        if let Some(storage) = parse(&lookup, "STORAGE_BACKEND") {
            config.storage = storage;
        }
        config.database_url = lookup("DATABASE_URL");
        if let Some(pool_size) = parse::<u32>(&lookup, "DATABASE_POOL_SIZE") {
            config.pool_size = pool_size.max(1);
        }

        config
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let value = lookup(key)?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value = %value, "ignoring unparseable setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_should_use_defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.database_url, None);
        assert_eq!(config.pool_size, 10);
    }

    #[test]
    fn test_should_read_every_setting() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("STORAGE_BACKEND", "Memory"),
            ("DATABASE_URL", "postgres://localhost/monsters"),
            ("DATABASE_POOL_SIZE", "0"),
        ]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/monsters"));
        assert_eq!(config.pool_size, 1);
    }

    #[test]
    fn test_should_ignore_unparseable_values() {
        let config = config_from(&[("PORT", "eighty"), ("STORAGE_BACKEND", "sqlite")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageBackend::Postgres);
    }

    #[test]
    fn test_should_reject_unknown_backend() {
        assert_eq!(
            "redis".parse::<StorageBackend>(),
            Err(UnknownBackend("redis".to_string()))
        );
    }
}
