//! Process configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `CATALOG_BIND_ADDR` | `0.0.0.0:8080` |
//! | `CATALOG_STORE` | `memory` (`memory` or `mongodb`) |
//! | `CATALOG_SEED_DEMO` | `false` |
//! | `MONGODB_URI` | built from `MONGODB_HOST`/`MONGODB_PORT`/`MONGODB_USER`/`MONGODB_PASSWORD` |
//! | `MONGODB_DATABASE` | `Catalog` |

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MONGODB_HOST: &str = "127.0.0.1";
pub const DEFAULT_MONGODB_PORT: u16 = 27017;
pub const DEFAULT_MONGODB_DATABASE: &str = "Catalog";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

/// Which item store backs the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory { seed_demo: bool },
    MongoDb(MongoConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

impl CatalogConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = get("CATALOG_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("CATALOG_BIND_ADDR", e.to_string()))?;

        let seed_demo = match get("CATALOG_SEED_DEMO") {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                ConfigError::invalid("CATALOG_SEED_DEMO", format!("expected a boolean, got {v:?}"))
            })?,
            None => false,
        };

        let store = match get("CATALOG_STORE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("memory") | Some("in-memory") => StoreConfig::InMemory { seed_demo },
            Some("mongodb") | Some("mongo") => StoreConfig::MongoDb(mongo_config(&get)?),
            Some(other) => {
                return Err(ConfigError::invalid(
                    "CATALOG_STORE",
                    format!("expected memory or mongodb, got {other:?}"),
                ));
            }
        };

        Ok(Self { bind_addr, store })
    }
}

fn mongo_config<F>(get: &F) -> Result<MongoConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let uri = match get("MONGODB_URI") {
        Some(uri) => uri,
        None => {
            let host = get("MONGODB_HOST").unwrap_or_else(|| DEFAULT_MONGODB_HOST.to_string());
            let port = match get("MONGODB_PORT") {
                Some(p) => p
                    .parse::<u16>()
                    .map_err(|e| ConfigError::invalid("MONGODB_PORT", e.to_string()))?,
                None => DEFAULT_MONGODB_PORT,
            };
            match (get("MONGODB_USER"), get("MONGODB_PASSWORD")) {
                (Some(user), Some(password)) => format!("mongodb://{user}:{password}@{host}:{port}"),
                (None, None) => format!("mongodb://{host}:{port}"),
                _ => {
                    return Err(ConfigError::invalid(
                        "MONGODB_USER",
                        "MONGODB_USER and MONGODB_PASSWORD must be set together",
                    ));
                }
            }
        }
    };

    if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
        return Err(ConfigError::invalid("MONGODB_URI", "expected a mongodb:// or mongodb+srv:// uri"));
    }

    Ok(MongoConfig {
        uri,
        database: get("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_MONGODB_DATABASE.to_string()),
    })
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
