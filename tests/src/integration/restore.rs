//! # Restore Across Restarts
//!
//! Stats and scan-log records are written through on every change and read
//! once when a session is built. A session younger than the threshold is
//! reproduced exactly; an older one is discarded.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use checkin_engine::{
        CheckinScannerApi, InMemoryStore, JsonFileStore, MockScannerApi, MockTimeSource,
        ScanLogId, StatsRecord, SCAN_LOGS_KEY, STATS_KEY,
    };
    use serde_json::json;

    use crate::integration::fixtures::{invalid, session_over, valid, HOUR_MS, NOW};

    fn scripted() -> Arc<MockScannerApi> {
        let api = Arc::new(MockScannerApi::new());
        api.push_reply(valid("L1"))
            .push_reply(invalid("wrong gate"))
            .push_reply(valid("L2"));
        api
    }

    async fn run_three_scans(store: Arc<JsonFileStore>, clock: Arc<MockTimeSource>) {
        let session = session_over(store, clock, scripted());
        for token in ["QR-1", "QR-2", "QR-3"] {
            session.validate(token).await.unwrap();
        }
        session.shutdown();
    }

    #[tokio::test]
    async fn test_restart_within_threshold_resumes_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(MockTimeSource::new(NOW));
        run_three_scans(Arc::new(JsonFileStore::new(dir.path())), clock.clone()).await;

        clock.advance(2 * HOUR_MS);
        let resumed = session_over(
            Arc::new(JsonFileStore::new(dir.path())),
            clock,
            Arc::new(MockScannerApi::new()),
        );

        let s = resumed.snapshot();
        assert_eq!(s.stats.session_start, NOW);
        assert_eq!(s.stats.counters.session, 3);
        assert_eq!(s.stats.counters.session_valid_increment, 2);
        assert_eq!(s.stats.counters.session_failed_increment, 1);
        assert_eq!(
            s.session_scan_logs,
            vec![ScanLogId::from("L1"), ScanLogId::from("L2")]
        );
        // the feed and dialog are not persisted
        assert!(s.feed.is_empty());
        assert!(!s.modal.is_open);
    }

    #[tokio::test]
    async fn test_restart_past_threshold_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(MockTimeSource::new(NOW));
        run_three_scans(Arc::new(JsonFileStore::new(dir.path())), clock.clone()).await;

        clock.advance(13 * HOUR_MS);
        let store = Arc::new(JsonFileStore::new(dir.path()));
        let fresh = session_over(store.clone(), clock, Arc::new(MockScannerApi::new()));

        let s = fresh.snapshot();
        assert_eq!(s.stats.session_start, NOW + 13 * HOUR_MS);
        assert_eq!(s.stats.counters.session, 0);
        assert!(s.session_scan_logs.is_empty());

        // the fresh session overwrote the stale records
        let raw = std::fs::read_to_string(dir.path().join(format!("{STATS_KEY}.json"))).unwrap();
        let record: StatsRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.session_start, NOW + 13 * HOUR_MS);
    }

    #[tokio::test]
    async fn test_records_use_wire_field_names() {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(MockTimeSource::new(NOW));
        let session = session_over(store.clone(), clock, scripted());
        session.validate("QR-1").await.unwrap();

        let stats = store.peek(STATS_KEY).unwrap();
        for field in [
            "todayIncrement",
            "session",
            "sessionValidIncrement",
            "sessionFailedIncrement",
            "queued",
            "sessionStart",
            "lastActivity",
        ] {
            assert!(stats.get(field).is_some(), "missing {field}");
        }
        let logs = store.peek(SCAN_LOGS_KEY).unwrap();
        assert_eq!(logs["ids"], json!(["L1"]));
        assert_eq!(logs["sessionStart"], json!(NOW));
    }

    #[tokio::test]
    async fn test_mismatched_scan_logs_are_dropped() {
        let store = Arc::new(InMemoryStore::new());
        store.insert(
            STATS_KEY,
            json!({
                "todayIncrement": 4, "session": 4, "sessionValidIncrement": 3,
                "sessionFailedIncrement": 1, "queued": 0,
                "sessionStart": NOW, "lastActivity": NOW + 1_000
            }),
        );
        store.insert(
            SCAN_LOGS_KEY,
            json!({"ids": ["OLD"], "sessionStart": NOW - HOUR_MS, "lastActivity": NOW}),
        );
        let clock = Arc::new(MockTimeSource::new(NOW + HOUR_MS));
        let session = session_over(store, clock, Arc::new(MockScannerApi::new()));

        let s = session.snapshot();
        assert_eq!(s.stats.counters.session, 4);
        assert!(s.session_scan_logs.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_records_fall_back_to_fresh() {
        let store = Arc::new(InMemoryStore::new());
        store.insert(STATS_KEY, json!("not a record"));
        store.insert(SCAN_LOGS_KEY, json!({"ids": 7}));
        let clock = Arc::new(MockTimeSource::new(NOW));
        let session = session_over(store, clock, Arc::new(MockScannerApi::new()));

        let s = session.snapshot();
        assert_eq!(s.stats.session_start, NOW);
        assert_eq!(s.stats.counters.session, 0);
    }

    #[tokio::test]
    async fn test_disabled_store_never_blocks_scanning() {
        let store = Arc::new(InMemoryStore::new());
        store.set_disabled(true);
        let clock = Arc::new(MockTimeSource::new(NOW));
        let session = session_over(store.clone(), clock, scripted());

        for token in ["QR-1", "QR-2", "QR-3"] {
            session.validate(token).await.unwrap();
        }
        assert_eq!(session.snapshot().stats.counters.session, 3);
        assert_eq!(store.writes(), 0);

        // the next mutation after recovery writes the whole state
        store.set_disabled(false);
        session.clear_session();
        assert!(store.writes() > 0);
    }
}
