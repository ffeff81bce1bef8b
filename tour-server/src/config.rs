//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::preferences::{MemoryStoreConfig, Neo4jConfig};

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used
    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Catalog JSON file. The built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,

    /// Directory served under `/static`.
    pub static_dir: String,

    /// In-memory preference store settings.
    pub memory_store: MemoryStoreConfig,

    /// Neo4j settings. The in-memory store is used when unset.
    pub neo4j: Option<Neo4jConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            catalog_path: None,
            static_dir: "static".to_string(),
            memory_store: MemoryStoreConfig::default(),
            neo4j: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        let addr = get("TOUR_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        config.bind_addr = addr.trim().parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                var: "TOUR_BIND_ADDR",
                value: addr.clone(),
                reason: e.to_string(),
            }
        })?;

        config.catalog_path = get("TOUR_CATALOG").map(PathBuf::from);

        if let Some(dir) = get("TOUR_STATIC_DIR") {
            config.static_dir = dir;
        }

        if let Some(secs) = get("TOUR_PREFERENCE_TTL_SECS") {
            let secs = parse_u64("TOUR_PREFERENCE_TTL_SECS", &secs)?;
            config.memory_store.ttl = Duration::from_secs(secs);
        }
        if let Some(capacity) = get("TOUR_PREFERENCE_CAPACITY") {
            config.memory_store.max_capacity = parse_u64("TOUR_PREFERENCE_CAPACITY", &capacity)?;
        }

        config.neo4j = get("NEO4J_URI").map(|uri| {
            let user = get("NEO4J_USER").unwrap_or_else(|| "neo4j".to_string());
            let password = lookup("NEO4J_PASSWORD").unwrap_or_default();
            let neo4j = Neo4jConfig::new(uri, user, password);
            match get("NEO4J_DATABASE") {
                Some(db) => neo4j.with_database(db),
                None => neo4j,
            }
        });

        Ok(config)
    }

    /// Use a catalog file instead of the built-in data.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Store preferences in Neo4j.
    pub fn with_neo4j(mut self, neo4j: Neo4jConfig) -> Self {
        self.neo4j = Some(neo4j);
        self
    }
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.memory_store.ttl, Duration::from_secs(86_400));
        assert_eq!(config.memory_store.max_capacity, 10_000);
        assert!(config.neo4j.is_none());
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("TOUR_BIND_ADDR", "0.0.0.0:9000"),
            ("TOUR_CATALOG", "/etc/tour/catalog.json"),
            ("TOUR_STATIC_DIR", "assets"),
            ("TOUR_PREFERENCE_TTL_SECS", "60"),
            ("TOUR_PREFERENCE_CAPACITY", "5"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/tour/catalog.json"))
        );
        assert_eq!(config.static_dir, "assets");
        assert_eq!(config.memory_store.ttl, Duration::from_secs(60));
        assert_eq!(config.memory_store.max_capacity, 5);
    }

    #[test]
    fn neo4j_settings() {
        let config = config_from(&[
            ("NEO4J_URI", "http://localhost:7474"),
            ("NEO4J_PASSWORD", "secret"),
            ("NEO4J_DATABASE", "tours"),
        ])
        .unwrap();

        let neo4j = config.neo4j.unwrap();
        assert_eq!(neo4j.uri, "http://localhost:7474");
        assert_eq!(neo4j.user, "neo4j");
        assert_eq!(neo4j.password, "secret");
        assert_eq!(neo4j.database, "tours");
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = config_from(&[("NEO4J_URI", ""), ("TOUR_CATALOG", " ")]).unwrap();
        assert!(config.neo4j.is_none());
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn invalid_values_fail() {
        let err = config_from(&[("TOUR_BIND_ADDR", "not an address")]).unwrap_err();
        assert!(err.to_string().contains("TOUR_BIND_ADDR"));

        assert!(config_from(&[("TOUR_PREFERENCE_CAPACITY", "-1")]).is_err());
        assert!(config_from(&[("TOUR_PREFERENCE_TTL_SECS", "soon")]).is_err());
    }

    #[test]
    fn builders() {
        let config = AppConfig::default()
            .with_catalog_path("catalog.json")
            .with_neo4j(Neo4jConfig::new("http://db:7474", "neo4j", "pw"));
        assert!(config.catalog_path.is_some());
        assert!(config.neo4j.is_some());
    }
}
