//! # Session Persistence Records
//!
//! The scanner keeps two records in the counter store:
//!
//! | Key | Record | Contents |
//! |-----|--------|----------|
//! | `scanner.stats` | [`StatsRecord`] | increments, `sessionStart`, `lastActivity` |
//! | `scanner.scan_logs` | [`ScanLogRecord`] | scan-log ids, `sessionStart`, `lastActivity` |
//!
//! Baselines are never written; they are re-fetched after restart.
//!
//! ## Restore Rules
//!
//! 1. A stats record older than the session threshold is treated as absent.
//! 2. A scan-log record is kept only if it is fresh AND its `sessionStart`
//!    matches the restored stats record. Otherwise the ledger starts empty.
//! 3. With no usable stats record a fresh session starts at `now`.

use serde::{Deserialize, Serialize};

use super::ledger::SessionLedger;
use super::stats::{ScanStats, SessionCounters};
use super::value_objects::{ScanLogId, Timestamp};

/// Store key for the stats record.
pub const STATS_KEY: &str = "scanner.stats";

/// Store key for the scan-log record.
pub const SCAN_LOGS_KEY: &str = "scanner.scan_logs";

/// Persisted form of [`ScanStats`] without baselines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    #[serde(flatten)]
    pub counters: SessionCounters,
    pub session_start: Timestamp,
    pub last_activity: Timestamp,
}

/// Persisted form of the session ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanLogRecord {
    pub ids: Vec<ScanLogId>,
    pub session_start: Timestamp,
    pub last_activity: Timestamp,
}

impl ScanLogRecord {
    pub fn from_ledger(ledger: &SessionLedger, stats: &ScanStats) -> Self {
        Self {
            ids: ledger.snapshot(),
            session_start: stats.session_start,
            last_activity: stats.last_activity,
        }
    }
}

/// Whether a session that began at `session_start` is past `ttl_ms`.
pub fn is_expired(session_start: Timestamp, now: Timestamp, ttl_ms: u64) -> bool {
    now.saturating_sub(session_start) > ttl_ms
}

/// Result of reading persisted records at startup.
#[derive(Clone, Debug)]
pub struct RestoredSession {
    pub stats: ScanStats,
    pub ledger: SessionLedger,
    /// `true` when a persisted session was resumed.
    pub resumed: bool,
}

/// Rebuild session state from whatever the store returned.
pub fn restore_session(
    stats: Option<StatsRecord>,
    scan_logs: Option<ScanLogRecord>,
    now: Timestamp,
    ttl_ms: u64,
    ledger_cap: usize,
) -> RestoredSession {
    let stats = match stats {
        Some(record) if !is_expired(record.session_start, now, ttl_ms) => record,
        _ => {
            return RestoredSession {
                stats: ScanStats::fresh(now),
                ledger: SessionLedger::new(ledger_cap),
                resumed: false,
            }
        }
    };

    let ledger = match scan_logs {
        Some(record)
            if record.session_start == stats.session_start
                && !is_expired(record.session_start, now, ttl_ms) =>
        {
            SessionLedger::restore(record.ids, ledger_cap)
        }
        _ => SessionLedger::new(ledger_cap),
    };

    RestoredSession {
        stats: ScanStats::from_record(&stats),
        ledger,
        resumed: true,
    }
}
