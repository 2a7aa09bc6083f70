//! Record store subsystem
//!
//! The handler talks to persisted records only through [`RecordStore`].
//! Two backends exist: an in-process map and Amazon DynamoDB. Whichever is
//! configured is opened once per process and shared by every invocation.

mod config;
mod dynamo;
mod errors;
mod memory;
mod shared;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::record::Record;
use crate::update::MutationDirective;

pub use config::{StoreBackend, StoreConfig};
pub use dynamo::DynamoStore;
pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use shared::{open_store, shared_store};

/// Primitive operations of a single-key record store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert or replace the record under its key.
    ///
    /// Returns the store acknowledgement (previous attributes, if any).
    async fn put(&self, record: Record) -> StoreResult<Value>;

    /// Every record in the collection, in store order
    async fn scan(&self) -> StoreResult<Vec<Record>>;

    /// Apply `directive` as one combined mutation to the record keyed by
    /// `key` and return the record as it is afterwards.
    async fn update(&self, key: &str, directive: &MutationDirective) -> StoreResult<Record>;

    /// Remove the record keyed by `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> StoreResult<Value>;
}

/// Acknowledgement carrying the attributes a write replaced or removed
pub(crate) fn ack(previous: Option<Record>) -> Value {
    json!({ "attributes": previous })
}
