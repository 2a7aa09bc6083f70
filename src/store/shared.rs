//! Process-wide store handle
//!
//! The first invocation opens the configured backend; later invocations
//! reuse the same handle. It is never torn down explicitly.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::schema::CollectionSchema;

use super::config::{StoreBackend, StoreConfig};
use super::dynamo::DynamoStore;
use super::memory::InMemoryStore;
use super::RecordStore;

static SHARED_STORE: OnceCell<Arc<dyn RecordStore>> = OnceCell::const_new();

/// Open a new handle to the configured backend
pub async fn open_store(config: &StoreConfig, schema: &CollectionSchema) -> Arc<dyn RecordStore> {
    match config.backend {
        StoreBackend::Memory => Arc::new(InMemoryStore::new(schema.key_field())),
        StoreBackend::DynamoDb => Arc::new(DynamoStore::connect(config, schema).await),
    }
}

/// The process-wide handle, opened on first use.
///
/// Arguments are only consulted by the first call.
pub async fn shared_store(config: &StoreConfig, schema: &CollectionSchema) -> Arc<dyn RecordStore> {
    SHARED_STORE
        .get_or_init(|| async {
            tracing::debug!(backend = ?config.backend, "opening shared record store");
            open_store(config, schema).await
        })
        .await
        .clone()
}
