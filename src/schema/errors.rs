//! Collection schema errors

use thiserror::Error;

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Reasons a collection schema is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Table name is empty
    #[error("table name must not be empty")]
    EmptyTableName,

    /// Key field name is empty or malformed
    #[error("invalid key field name: '{0}'")]
    InvalidKeyField(String),

    /// Attribute name cannot be used as an expression placeholder
    #[error("invalid attribute name: '{0}'")]
    InvalidAttribute(String),

    /// Attribute declared more than once
    #[error("attribute declared twice: '{0}'")]
    DuplicateAttribute(String),

    /// The identity key was listed as a mutable attribute
    #[error("key field '{0}' cannot be a mutable attribute")]
    KeyAsAttribute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_field() {
        let err = SchemaError::KeyAsAttribute("vehicleName".to_string());
        assert!(err.to_string().contains("vehicleName"));

        let err = SchemaError::InvalidAttribute("bad name".to_string());
        assert!(err.to_string().contains("bad name"));
    }
}
