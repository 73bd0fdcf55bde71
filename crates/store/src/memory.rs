//! In-memory record store.
//!
//! Evaluates the same filter expressions the HTTP store renders, honors
//! sort and limit, and supports per-collection fault injection so both
//! error-handling policies (best-effort and strict) are testable without a
//! live backend.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use crate::client::RecordStore;
use crate::error::StoreError;
use crate::filter::ListQuery;

/// In-process [`RecordStore`] backed by per-collection vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    failing: Mutex<HashSet<String>>,
    seq: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation on `collection` fail with
    /// [`StoreError::Unavailable`].
    pub fn fail_collection(&self, collection: &str) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(collection.to_string());
    }

    /// Clears fault injection for `collection`.
    pub fn heal_collection(&self, collection: &str) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(collection);
    }

    /// Number of records currently in `collection`.
    #[must_use]
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn check_available(&self, collection: &str) -> Result<(), StoreError> {
        let failing = self.failing.lock().unwrap_or_else(PoisonError::into_inner);
        if failing.contains(collection) {
            return Err(StoreError::Unavailable(format!(
                "collection '{collection}' is failing"
            )));
        }
        Ok(())
    }

    fn next_id(&self) -> String {
        // 15-character ids, matching the backend's opaque id shape.
        format!("rec{:012}", self.seq.fetch_add(1, Ordering::Relaxed))
    }
}

fn sort_key(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn project_fields(record: &Value, fields: &[String]) -> Value {
    let Value::Object(map) = record else {
        return record.clone();
    };
    let projected: serde_json::Map<String, Value> = map
        .iter()
        .filter(|(k, _)| fields.iter().any(|f| f == *k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Value::Object(projected)
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, collection: &str, record: Value) -> Result<Value, StoreError> {
        self.check_available(collection)?;

        let mut stored = record;
        if let Value::Object(map) = &mut stored {
            if !map.contains_key("id") {
                map.insert("id".to_string(), Value::String(self.next_id()));
            }
            if !map.contains_key("created") {
                map.insert(
                    "created".to_string(),
                    Value::String(Utc::now().format("%Y-%m-%d %H:%M:%S%.3fZ").to_string()),
                );
            }
        }

        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(collection.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Value>, StoreError> {
        self.check_available(collection)?;

        let collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut matched: Vec<Value> = collections
            .get(collection)
            .into_iter()
            .flatten()
            .filter(|r| query.filter.as_ref().is_none_or(|f| f.matches(r)))
            .cloned()
            .collect();
        drop(collections);

        if let Some(sort) = &query.sort {
            let (key, descending) = sort
                .strip_prefix('-')
                .map_or((sort.as_str(), false), |k| (k, true));
            matched.sort_by_key(|r| sort_key(r, key));
            if descending {
                matched.reverse();
            }
        }

        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        if let Some(fields) = &query.fields {
            matched = matched.iter().map(|r| project_fields(r, fields)).collect();
        }

        Ok(matched)
    }

    async fn get_one(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        self.check_available(collection)?;

        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .into_iter()
            .flatten()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<Value, StoreError> {
        self.check_available(collection)?;

        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let record = collections
            .get_mut(collection)
            .into_iter()
            .flatten()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        if let (Value::Object(target), Value::Object(changes)) = (&mut *record, &patch) {
            for (key, value) in changes {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(record.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.check_available(collection)?;

        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        let before = records.len();
        records.retain(|r| r.get("id").and_then(Value::as_str) != Some(id));
        if records.len() == before {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
