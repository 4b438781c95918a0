//! # Scan Outcome Flows
//!
//! A decoded token travels validator → reconciler → feed → presenter →
//! ledger. Each test drives a full `ScannerSession` against a scripted API
//! and checks every component the outcome touches.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use checkin_engine::{
        ApiError, Baselines, CheckinScannerApi, OutcomeKind, ResultKind, ScanLogId,
        ScannerConfig, StatTile, MAX_SESSION_SCAN_LOGS,
    };

    use crate::integration::fixtures::{invalid, valid, valid_with_ticket, Harness};

    // =========================================================================
    // SINGLE OUTCOMES
    // =========================================================================

    #[tokio::test]
    async fn test_valid_scan_counts_logs_and_presents() {
        let h = Harness::new();
        h.api.push_reply(valid_with_ticket("L1", "Ada Lovelace"));

        h.session.validate("QR-000111").await.unwrap();

        let s = h.session.snapshot();
        assert_eq!(s.stats.counters.session, 1);
        assert_eq!(s.stats.counters.session_valid_increment, 1);
        assert_eq!(s.session_scan_logs, vec![ScanLogId::from("L1")]);
        assert_eq!(s.feed.len(), 1);
        assert_eq!(s.feed[0].kind, ResultKind::Success);

        let result = s.modal.result.expect("dialog shows the outcome");
        assert!(result.details.contains("Attendee: Ada Lovelace"));
        assert!(result.details.contains("Type: General"));
        assert!(result.details.contains("Scans: 1/3"));
        assert_eq!(s.modal.countdown, 30);
    }

    #[tokio::test]
    async fn test_rate_limited_scan_is_failed() {
        let h = Harness::new();
        h.api
            .push_reply(Ok(checkin_engine::ValidateReply::status(429)));

        let outcome = h.session.validate("QR-1").await.unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::RateLimited);

        let s = h.session.snapshot();
        assert_eq!(s.stats.counters.session, 1);
        assert_eq!(s.stats.counters.session_failed_increment, 1);
        let result = s.modal.result.unwrap();
        assert_eq!(result.kind, ResultKind::Error);
        assert!(result.title.contains("Rate Limit"));
        assert!(s.session_scan_logs.is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_is_queued_not_failed() {
        let h = Harness::new();
        h.api.push_reply(Err(ApiError::Connection("refused".into())));

        let outcome = h.session.validate("QR-1").await.unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::NetworkFailure);

        let s = h.session.snapshot();
        assert_eq!(s.stats.counters.queued, 1);
        assert_eq!(s.stats.counters.session, 0);
        assert_eq!(s.stats.counters.session_failed_increment, 0);
        assert_eq!(s.modal.result.unwrap().kind, ResultKind::Queued);
        assert_eq!(s.feed[0].kind, ResultKind::Queued);
    }

    #[tokio::test]
    async fn test_exhausted_ticket_and_server_reason() {
        let h = Harness::new();
        h.api
            .push_reply(Ok(checkin_engine::ValidateReply::status(410)))
            .push_reply(invalid("Ticket belongs to another event"));

        assert_eq!(
            h.session.validate("QR-1").await.unwrap().kind(),
            OutcomeKind::LimitExceeded
        );
        h.session.validate("QR-2").await.unwrap();

        let s = h.session.snapshot();
        assert_eq!(s.stats.counters.session_failed_increment, 2);
        assert_eq!(
            s.modal.result.unwrap().details,
            "Ticket belongs to another event"
        );
        // newest first
        assert_eq!(s.feed[0].details, "Ticket belongs to another event");
    }

    // =========================================================================
    // SEQUENCES
    // =========================================================================

    #[tokio::test]
    async fn test_mixed_sequence_keeps_session_sum() {
        let h = Harness::new();
        h.api
            .push_reply(valid("L1"))
            .push_reply(invalid("nope"))
            .push_reply(Err(ApiError::Timeout))
            .push_reply(valid("L2"))
            .push_reply(Ok(checkin_engine::ValidateReply::status(429)));

        for i in 0..5 {
            h.session.validate(&format!("QR-{i}")).await.unwrap();
        }

        let s = h.session.snapshot();
        let c = s.stats.counters;
        assert_eq!(c.session, c.session_valid_increment + c.session_failed_increment);
        assert_eq!(c.session_valid_increment, 2);
        assert_eq!(c.session_failed_increment, 2);
        assert_eq!(c.queued, 1);
        assert_eq!(s.feed.len(), 5);
        assert_eq!(
            s.session_scan_logs,
            vec![ScanLogId::from("L1"), ScanLogId::from("L2")]
        );
    }

    #[tokio::test]
    async fn test_ledger_evicts_oldest_past_cap() {
        let h = Harness::new();
        let scans = MAX_SESSION_SCAN_LOGS + 1;
        for i in 0..scans {
            h.api.push_reply(valid(&format!("L{i}")));
        }
        for i in 0..scans {
            h.session.validate(&format!("QR-{i}")).await.unwrap();
        }

        let s = h.session.snapshot();
        assert_eq!(s.session_scan_logs.len(), MAX_SESSION_SCAN_LOGS);
        assert!(!s.session_scan_logs.contains(&ScanLogId::from("L0")));
        assert_eq!(s.session_scan_logs[0], ScanLogId::from("L1"));
        assert_eq!(
            s.session_scan_logs.last(),
            Some(&ScanLogId::from(format!("L{}", scans - 1)))
        );
        assert_eq!(s.stats.counters.session, scans as u64);
        assert_eq!(s.feed.len(), ScannerConfig::default().activity_feed_capacity);
    }

    #[tokio::test]
    async fn test_repeated_ticket_is_not_deduplicated() {
        let h = Harness::new();
        h.api.push_reply(valid("L1")).push_reply(valid("L2"));
        h.session.validate("QR-SAME").await.unwrap();
        h.session.validate("QR-SAME").await.unwrap();

        let s = h.session.snapshot();
        assert_eq!(s.feed.len(), 2);
        assert_eq!(s.stats.counters.session_valid_increment, 2);
    }

    // =========================================================================
    // BASELINES
    // =========================================================================

    #[tokio::test]
    async fn test_tiles_sum_baseline_and_increment() {
        let h = Harness::new();
        h.api.set_stats(Ok(Baselines {
            today: 40,
            total: 400,
            valid: 380,
            failed: 20,
        }));
        h.api.push_reply(valid("L1")).push_reply(invalid("x"));

        h.session.validate("QR-1").await.unwrap();
        assert!(h.session.refresh_baseline().await);
        h.session.validate("QR-2").await.unwrap();

        let s = h.session.snapshot();
        for (tile, value) in s.tiles {
            assert_eq!(value, s.stats.baseline(tile) + s.stats.increment(tile));
        }
        assert_eq!(s.stats.displayed(StatTile::Valid), 381);
        assert_eq!(s.stats.displayed(StatTile::Failed), 21);
        assert_eq!(s.stats.displayed(StatTile::Session), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_baseline_landing_mid_validation_keeps_both() {
        let h = Harness::new();
        h.api.set_delay(Duration::from_secs(2));
        h.api.push_reply(valid("L1"));
        h.api.set_stats(Ok(Baselines {
            today: 5,
            total: 50,
            valid: 45,
            failed: 5,
        }));

        let session = Arc::clone(&h.session);
        let scan = tokio::spawn(async move { session.validate("QR-1").await });
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(h.session.refresh_baseline().await);
        scan.await.unwrap().unwrap();

        let s = h.session.snapshot();
        assert_eq!(s.stats.baseline.total, 50);
        assert_eq!(s.stats.displayed(StatTile::Total), 51);
    }
}
