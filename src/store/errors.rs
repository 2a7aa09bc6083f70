//! Record store errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by a record store backend
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Record handed to `put` has no usable key
    #[error("record is missing key field '{0}'")]
    MissingKey(String),

    /// Value cannot be represented by the backend
    #[error("unsupported attribute value: {0}")]
    Conversion(String),

    /// The backend rejected or failed the call
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        StoreError::Backend(msg.into())
    }
}
