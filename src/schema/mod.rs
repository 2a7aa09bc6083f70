//! Collection schema for the record handler
//!
//! A schema names the backing table, the identity key field, and the
//! fixed set of mutable attributes. Only declared attributes ever reach
//! the store; unknown request keys are dropped.

mod collection;
mod errors;

pub use collection::{
    CollectionSchema, DEFAULT_TABLE_NAME, VEHICLE_ATTRIBUTES, VEHICLE_KEY_FIELD,
};
pub use errors::{SchemaError, SchemaResult};
