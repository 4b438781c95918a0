//! Typed, failure-swallowing wrapper over a [`CounterStore`].
//!
//! A failed write leaves the in-memory state as the only copy until the next
//! successful write. Nothing here ever returns an error to the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ports::CounterStore;

#[derive(Clone)]
pub struct PersistentCounterStore {
    inner: Arc<dyn CounterStore>,
}

impl PersistentCounterStore {
    pub fn new(inner: Arc<dyn CounterStore>) -> Self {
        Self { inner }
    }

    /// Read and decode a record. Missing, unreadable and malformed records
    /// all come back as `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.inner.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key, "no persisted record");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "failed to load persisted record");
                return None;
            }
        };
        match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key, error = %e, "discarding malformed persisted record");
                None
            }
        }
    }

    /// Encode and write a record. Returns whether the write succeeded.
    pub fn save<T: Serialize>(&self, key: &str, record: &T) -> bool {
        let value = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize record");
                return false;
            }
        };
        match self.inner.save(key, &value) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "failed to persist record; keeping in-memory state");
                false
            }
        }
    }
}
