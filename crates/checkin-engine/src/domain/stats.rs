//! Scan statistics: server baselines plus locally accumulated increments.
//!
//! Every tile is displayed as `baseline + increment`. Baselines are only ever
//! replaced by a server poll; increments only ever grow from local outcomes
//! and drop back to zero on an explicit session reset.

use serde::{Deserialize, Serialize};

use super::persistence::StatsRecord;
use super::value_objects::Timestamp;

/// Server-authoritative counters as of the last successful poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Baselines {
    pub today: u64,
    pub total: u64,
    pub valid: u64,
    pub failed: u64,
}

/// Locally accumulated deltas for the current session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionCounters {
    pub today_increment: u64,
    pub session: u64,
    pub session_valid_increment: u64,
    pub session_failed_increment: u64,
    pub queued: u64,
}

/// The five stat tiles shown to the operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatTile {
    Today,
    Session,
    Total,
    Valid,
    Failed,
}

impl StatTile {
    pub const ALL: [StatTile; 5] = [
        StatTile::Today,
        StatTile::Session,
        StatTile::Total,
        StatTile::Valid,
        StatTile::Failed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Session => "Session",
            Self::Total => "Total",
            Self::Valid => "Valid",
            Self::Failed => "Failed",
        }
    }
}

/// How a terminal validation outcome moves the counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountedOutcome {
    Valid,
    Failed,
    Queued,
}

/// View-model behind the stat tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanStats {
    pub baseline: Baselines,
    pub counters: SessionCounters,
    pub session_start: Timestamp,
    pub last_activity: Timestamp,
}

impl ScanStats {
    /// A new session starting at `now` with zero increments.
    pub fn fresh(now: Timestamp) -> Self {
        Self {
            baseline: Baselines::default(),
            counters: SessionCounters::default(),
            session_start: now,
            last_activity: now,
        }
    }

    /// Rebuild stats from a persisted record. Baselines are never persisted.
    pub fn from_record(record: &StatsRecord) -> Self {
        Self {
            baseline: Baselines::default(),
            counters: record.counters,
            session_start: record.session_start,
            last_activity: record.last_activity,
        }
    }

    pub fn to_record(&self) -> StatsRecord {
        StatsRecord {
            counters: self.counters,
            session_start: self.session_start,
            last_activity: self.last_activity,
        }
    }

    pub fn baseline(&self, tile: StatTile) -> u64 {
        match tile {
            StatTile::Today => self.baseline.today,
            StatTile::Session => 0,
            StatTile::Total => self.baseline.total,
            StatTile::Valid => self.baseline.valid,
            StatTile::Failed => self.baseline.failed,
        }
    }

    pub fn increment(&self, tile: StatTile) -> u64 {
        match tile {
            StatTile::Today => self.counters.today_increment,
            StatTile::Session | StatTile::Total => self.counters.session,
            StatTile::Valid => self.counters.session_valid_increment,
            StatTile::Failed => self.counters.session_failed_increment,
        }
    }

    pub fn displayed(&self, tile: StatTile) -> u64 {
        self.baseline(tile).saturating_add(self.increment(tile))
    }

    /// All five tiles in display order.
    pub fn tiles(&self) -> [(StatTile, u64); 5] {
        StatTile::ALL.map(|tile| (tile, self.displayed(tile)))
    }

    /// Replace baselines with a fresh server poll. Increments are untouched.
    pub fn merge_baseline(&mut self, baseline: Baselines) {
        self.baseline = baseline;
    }

    /// Apply one local outcome to the current counters.
    pub fn record(&mut self, outcome: CountedOutcome, now: Timestamp) {
        let c = &mut self.counters;
        match outcome {
            CountedOutcome::Valid => {
                c.session += 1;
                c.session_valid_increment += 1;
                c.today_increment += 1;
            }
            CountedOutcome::Failed => {
                c.session += 1;
                c.session_failed_increment += 1;
                c.today_increment += 1;
            }
            CountedOutcome::Queued => c.queued += 1,
        }
        self.last_activity = now;
    }

    /// Zero every increment and open a new session.
    ///
    /// The new `session_start` is always strictly later than the old one.
    pub fn reset(&mut self, now: Timestamp) {
        self.counters = SessionCounters::default();
        self.session_start = now.max(self.session_start + 1);
        self.last_activity = self.session_start;
    }

    pub fn age(&self, now: Timestamp) -> u64 {
        now.saturating_sub(self.session_start)
    }
}
