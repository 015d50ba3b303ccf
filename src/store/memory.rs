//! In-memory settings store
//!
//! Handles are cheap to clone and share one map, so a host (or a test) can keep
//! a handle for inspection after handing another to the controller.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use super::{PersistenceError, SettingsStore};

/// A value held by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Default)]
struct Inner {
    values: BTreeMap<String, StoredValue>,
    failing_keys: HashSet<String>,
    fail_all: bool,
    writes: usize,
}

/// Thread-safe, shareable key-value store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON object of keys to booleans or strings
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let values: BTreeMap<String, StoredValue> = serde_json::from_str(json)?;
        let store = Self::new();
        store.lock().values = values;
        Ok(store)
    }

    /// Serialize the current contents as a JSON object
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.lock().values)
    }

    /// Seed a boolean without counting it as a write
    pub fn with_bool(self, key: &str, value: bool) -> Self {
        self.lock()
            .values
            .insert(key.to_string(), StoredValue::Bool(value));
        self
    }

    /// Seed a string without counting it as a write
    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.lock()
            .values
            .insert(key.to_string(), StoredValue::Text(value.to_string()));
        self
    }

    /// Make every write to `key` fail until cleared
    pub fn fail_writes_to(&self, key: &str) {
        self.lock().failing_keys.insert(key.to_string());
    }

    /// Make every write fail (or succeed again)
    pub fn set_fail_all(&self, fail: bool) {
        let mut inner = self.lock();
        inner.fail_all = fail;
        if !fail {
            inner.failing_keys.clear();
        }
    }

    /// Number of successful writes since creation
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    /// Raw stored value for `key`
    pub fn get(&self, key: &str) -> Option<StoredValue> {
        self.lock().values.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().values.contains_key(key)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, key: &str, value: StoredValue) -> Result<(), PersistenceError> {
        let mut inner = self.lock();
        if inner.fail_all || inner.failing_keys.contains(key) {
            return Err(PersistenceError::new(key, "write rejected by store"));
        }
        inner.values.insert(key.to_string(), value);
        inner.writes += 1;
        Ok(())
    }
}

impl SettingsStore for MemoryStore {
    fn get_bool(&self, key: &str) -> bool {
        matches!(self.lock().values.get(key), Some(StoredValue::Bool(true)))
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<(), PersistenceError> {
        self.write(key, StoredValue::Bool(value))
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.lock().values.get(key) {
            Some(StoredValue::Text(text)) => Some(text.clone()),
            _ => None,
        }
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.write(key, StoredValue::Text(value.to_string()))
    }
}
