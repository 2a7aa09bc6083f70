//! Application configuration
//!
//! One JSON file, every field optional:
//!
//! ```json
//! {
//!   "server": {"host": "0.0.0.0", "port": 3000},
//!   "store": {"backend": "memory", "region": null, "endpoint_url": null},
//!   "collection": {"table_name": "vehicles-table", "key_field": "vehicleName",
//!                  "attributes": ["type", "brand"]},
//!   "logging": {"level": "info", "json": true}
//! }
//! ```
//!
//! `VEHICLES_TABLE` in the environment overrides the table name.

mod errors;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::LoggingConfig;
use crate::schema::{
    CollectionSchema, DEFAULT_TABLE_NAME, VEHICLE_ATTRIBUTES, VEHICLE_KEY_FIELD,
};
use crate::store::StoreConfig;

pub use errors::{ConfigError, ConfigResult};

/// Environment variable overriding the table name
pub const TABLE_NAME_ENV: &str = "VEHICLES_TABLE";

/// Collection section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Backing table (default: "vehicles-table")
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Identity key field (default: "vehicleName")
    #[serde(default = "default_key_field")]
    pub key_field: String,

    /// Mutable attributes (default: the vehicle attributes)
    #[serde(default = "default_attributes")]
    pub attributes: Vec<String>,
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

fn default_key_field() -> String {
    VEHICLE_KEY_FIELD.to_string()
}

fn default_attributes() -> Vec<String> {
    VEHICLE_ATTRIBUTES.iter().map(|a| a.to_string()).collect()
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            key_field: default_key_field(),
            attributes: default_attributes(),
        }
    }
}

impl CollectionConfig {
    pub fn schema(&self) -> ConfigResult<CollectionSchema> {
        Ok(CollectionSchema::new(
            self.table_name.clone(),
            self.key_field.clone(),
            self.attributes.iter().cloned(),
        )?)
    }
}

/// Whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub collection: CollectionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut config: AppConfig = serde_json::from_str(&content)?;
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when the file exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            return Self::load(path);
        }

        let mut config = AppConfig::default();
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(table) = lookup(TABLE_NAME_ENV).filter(|t| !t.trim().is_empty()) {
            self.collection.table_name = table;
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        self.collection.schema()?;

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".to_string()));
        }

        if let Some(url) = &self.store.endpoint_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "store.endpoint_url must be an http(s) URL: '{}'",
                    url
                )));
            }
        }

        Ok(())
    }
}
