//! Configuration errors

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid configuration JSON
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Collection section describes an invalid schema
    #[error("invalid collection schema: {0}")]
    Schema(#[from] SchemaError),

    /// Any other rejected value
    #[error("invalid config: {0}")]
    Invalid(String),
}
