//! Activity feed: rolling, most-recent-first log of scan outcomes.
//!
//! Repeated scans of the same ticket produce repeated entries; the feed is an
//! audit trail for the operator, not a set.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::presenter::ResultKind;
use super::value_objects::Timestamp;

/// One entry in the activity feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEvent {
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub title: String,
    pub details: String,
    pub is_test_ticket: bool,
    pub ticket_id: Option<String>,
}

/// Fixed-capacity feed, newest entry at index 0.
#[derive(Clone, Debug)]
pub struct ActivityFeed {
    events: VecDeque<ScanEvent>,
    capacity: usize,
}

impl ActivityFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend an event, dropping the oldest beyond capacity.
    pub fn push(&mut self, event: ScanEvent) {
        self.events.push_front(event);
        self.events.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&ScanEvent> {
        self.events.front()
    }

    pub fn get(&self, index: usize) -> Option<&ScanEvent> {
        self.events.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanEvent> {
        self.events.iter()
    }

    pub fn to_vec(&self) -> Vec<ScanEvent> {
        self.events.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
