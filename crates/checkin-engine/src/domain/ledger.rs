//! Session ledger: bounded FIFO of scan-log ids for the active session.
//!
//! The ledger scopes "this session" ticket queries. It is append-only
//! between resets and evicts from the front once the cap is exceeded.

use std::collections::VecDeque;

use super::value_objects::ScanLogId;

/// Bounded, ordered list of scan-log ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionLedger {
    ids: VecDeque<ScanLogId>,
    cap: usize,
}

impl SessionLedger {
    /// Create an empty ledger. A zero cap is raised to one.
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            ids: VecDeque::with_capacity(cap.min(1024)),
            cap,
        }
    }

    /// Rebuild from a persisted list, keeping the newest `cap` entries.
    pub fn restore(ids: Vec<ScanLogId>, cap: usize) -> Self {
        let mut ledger = Self::new(cap);
        for id in ids {
            ledger.append(id);
        }
        ledger
    }

    /// Append an id, evicting the oldest entries beyond the cap.
    pub fn append(&mut self, id: ScanLogId) {
        self.ids.push_back(id);
        while self.ids.len() > self.cap {
            self.ids.pop_front();
        }
    }

    /// Current ids, oldest first.
    pub fn snapshot(&self) -> Vec<ScanLogId> {
        self.ids.iter().cloned().collect()
    }

    pub fn reset(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn contains(&self, id: &ScanLogId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanLogId> {
        self.ids.iter()
    }
}
