//! In-process record store
//!
//! Keeps records in a map keyed by the identity field. Used for local
//! serving and tests; contents are lost on exit.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::record::Record;
use crate::update::MutationDirective;

use super::errors::{StoreError, StoreResult};
use super::{ack, RecordStore};

/// Map-backed [`RecordStore`]
pub struct InMemoryStore {
    key_field: String,
    records: RwLock<BTreeMap<String, Record>>,
}

impl InMemoryStore {
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
            records: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of one record
    pub fn get(&self, key: &str) -> Option<Record> {
        self.records.read().ok()?.get(key).cloned()
    }

    fn poisoned() -> StoreError {
        StoreError::backend("record map lock poisoned")
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn put(&self, record: Record) -> StoreResult<Value> {
        let key = record
            .get(&self.key_field)
            .and_then(Value::as_str)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StoreError::MissingKey(self.key_field.clone()))?
            .to_string();

        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        let previous = records.insert(key, record);
        Ok(ack(previous))
    }

    async fn scan(&self) -> StoreResult<Vec<Record>> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.values().cloned().collect())
    }

    async fn update(&self, key: &str, directive: &MutationDirective) -> StoreResult<Record> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;

        // Missing keys are created, as the managed store does.
        let record = records.entry(key.to_string()).or_insert_with(|| {
            let mut fresh = Record::new();
            fresh.insert(self.key_field.clone(), Value::String(key.to_string()));
            fresh
        });
        directive.apply_to(record);

        Ok(record.clone())
    }

    async fn delete(&self, key: &str) -> StoreResult<Value> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        let previous = records.remove(key);
        Ok(ack(previous))
    }
}
