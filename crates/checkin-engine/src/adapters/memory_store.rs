//! In-memory counter store with a failure switch.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::domain::StoreError;
use crate::ports::CounterStore;

#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, Value>>,
    disabled: AtomicBool,
    writes: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent load and save fail with `StoreError::Disabled`.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Successful saves so far.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw stored value, bypassing the failure switch.
    pub fn peek(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: Value) {
        self.entries.write().insert(key.to_string(), value);
    }
}

impl CounterStore for InMemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        if self.disabled.load(Ordering::SeqCst) {
            return Err(StoreError::Disabled);
        }
        Ok(self.entries.read().get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        if self.disabled.load(Ordering::SeqCst) {
            return Err(StoreError::Disabled);
        }
        self.entries.write().insert(key.to_string(), value.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
