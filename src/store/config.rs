//! Record store configuration

use serde::{Deserialize, Serialize};

/// Which backend holds the records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process map, lost on exit
    #[default]
    Memory,
    /// Amazon DynamoDB
    DynamoDb,
}

/// Store connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend (default: "memory")
    #[serde(default)]
    pub backend: StoreBackend,

    /// AWS region; the SDK's default provider chain applies when unset
    #[serde(default)]
    pub region: Option<String>,

    /// Endpoint override, e.g. a local DynamoDB
    #[serde(default)]
    pub endpoint_url: Option<String>,
}
