//! Shared fixtures for handler tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use vehicle_registry::handler::{RecordHandler, RequestEvent};
use vehicle_registry::record::Record;
use vehicle_registry::schema::CollectionSchema;
use vehicle_registry::store::{InMemoryStore, RecordStore, StoreError, StoreResult};
use vehicle_registry::update::MutationDirective;

/// Wraps an in-memory store, counting calls and remembering the last
/// directive. Optionally fails every call.
pub struct RecordingStore {
    inner: InMemoryStore,
    calls: AtomicUsize,
    fail: bool,
    last_directive: Mutex<Option<MutationDirective>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryStore::new("vehicleName"),
            calls: AtomicUsize::new(0),
            fail: false,
            last_directive: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_directive(&self) -> Option<MutationDirective> {
        self.last_directive.lock().unwrap().clone()
    }

    pub fn get(&self, key: &str) -> Option<Record> {
        self.inner.get(key)
    }

    fn enter(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StoreError::backend("ProvisionedThroughputExceededException"));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn put(&self, record: Record) -> StoreResult<Value> {
        self.enter()?;
        self.inner.put(record).await
    }

    async fn scan(&self) -> StoreResult<Vec<Record>> {
        self.enter()?;
        self.inner.scan().await
    }

    async fn update(&self, key: &str, directive: &MutationDirective) -> StoreResult<Record> {
        *self.last_directive.lock().unwrap() = Some(directive.clone());
        self.enter()?;
        self.inner.update(key, directive).await
    }

    async fn delete(&self, key: &str) -> StoreResult<Value> {
        self.enter()?;
        self.inner.delete(key).await
    }
}

pub fn handler_with(store: Arc<RecordingStore>) -> RecordHandler {
    RecordHandler::new(CollectionSchema::default(), store)
}

pub fn event(method: &str, body: &str) -> RequestEvent {
    RequestEvent::new(method, Some(body.to_string()))
}

pub fn fields(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}
