//! Subscriber setup
//!
//! JSON lines by default, one event per line, for log ingestion. The
//! level comes from configuration unless `RUST_LOG` is set.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::{ObservabilityError, ObservabilityErrorCode, ObservabilityResult};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (default: "info")
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text (default: true)
    #[serde(default = "default_json")]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_json() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: default_json(),
        }
    }
}

impl LoggingConfig {
    /// Filter from `RUST_LOG`, falling back to the configured level
    pub fn filter(&self) -> ObservabilityResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| {
            ObservabilityError::new(
                ObservabilityErrorCode::InvalidFilter,
                format!("'{}': {}", self.level, e),
            )
        })
    }
}

/// Install the global subscriber. Call once, before serving.
pub fn init_logging(config: &LoggingConfig) -> ObservabilityResult<()> {
    let filter = config.filter()?;

    let result = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(false)
            .with_target(false)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
    };

    result.map_err(|e| {
        ObservabilityError::new(ObservabilityErrorCode::AlreadyInitialized, e.to_string())
    })
}
