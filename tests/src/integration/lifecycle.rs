//! # Timers, Overlay Races and Teardown
//!
//! Paused tokio time drives the countdown and poller deterministically.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use checkin_engine::{
        ApiError, CheckedInTicket, CheckinScannerApi, DecoderExit, PageDirection,
        PaginationInfo, ScanView, ScannerError, ScriptedTokenSource, TicketCategory, TicketsPage,
        ValidateReply,
    };

    use crate::integration::fixtures::{valid, Harness};

    fn page(ids: &[&str], page: u32, total_pages: u32) -> Result<TicketsPage, ApiError> {
        Ok(TicketsPage {
            tickets: ids
                .iter()
                .map(|id| CheckedInTicket {
                    ticket_id: id.to_string(),
                    ..Default::default()
                })
                .collect(),
            pagination: PaginationInfo {
                page,
                total_pages,
                has_prev: page > 1,
                has_next: page < total_pages,
                total: u64::from(total_pages) * 2,
            },
        })
    }

    // =========================================================================
    // RESULT DIALOG
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_untouched_dialog_closes_after_thirty_seconds() {
        let h = Harness::new();
        h.api.push_reply(valid("L1"));
        h.session.validate("QR-1").await.unwrap();

        let s = h.session.snapshot();
        assert!(s.modal.is_open);
        assert_eq!(s.modal.countdown, 30);
        assert_eq!(s.view, ScanView::ShowingResult);

        tokio::time::sleep(Duration::from_millis(30_100)).await;

        let s = h.session.snapshot();
        assert!(!s.modal.is_open);
        assert_eq!(s.view, ScanView::Scanning);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decoded_token_replaces_open_dialog() {
        let h = Harness::new();
        h.api
            .push_reply(valid("L1"))
            .push_reply(Ok(ValidateReply::status(429)));
        let mut source = ScriptedTokenSource::new(vec![Ok("QR-1".into()), Ok("QR-2".into())]);

        assert_eq!(
            h.session.run_decoder(&mut source).await,
            DecoderExit::Exhausted
        );

        let s = h.session.snapshot();
        assert_eq!(s.feed.len(), 2);
        assert_eq!(s.modal.countdown, 30);
        assert!(s.modal.result.unwrap().title.contains("Rate Limit"));
    }

    // =========================================================================
    // TICKETS OVERLAY
    // =========================================================================

    #[tokio::test]
    async fn test_overlay_pages_within_bounds() {
        let h = Harness::new();
        h.api.push_page(page(&["T-1", "T-2"], 1, 2));
        h.api.push_page(page(&["T-3"], 2, 2));

        h.session.open_tickets(TicketCategory::Valid).await;
        let overlay = h.session.snapshot().overlay;
        assert_eq!(overlay.tickets.len(), 2);
        assert!(overlay.pagination.has_next);
        assert!(!overlay.pagination.has_prev);

        // before the first page nothing is fetched
        assert!(!h.session.navigate_tickets(PageDirection::Prev).await);
        assert!(h.session.navigate_tickets(PageDirection::Next).await);
        let overlay = h.session.snapshot().overlay;
        assert_eq!(overlay.pagination.page, 2);
        assert_eq!(overlay.tickets[0].ticket_id, "T-3");

        // past the last page nothing is fetched
        assert!(!h.session.navigate_tickets(PageDirection::Next).await);
        let queries = h.api.queries();
        assert_eq!(queries.len(), 2);
        assert!(queries.iter().all(|q| q.scan_log_ids.is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_arriving_after_close_is_ignored() {
        let h = Harness::new();
        h.api.set_delay(Duration::from_secs(3));
        h.api.push_page(page(&["T-1"], 1, 1));

        let session = Arc::clone(&h.session);
        let fetch = tokio::spawn(async move { session.open_tickets(TicketCategory::Today).await });
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(h.session.snapshot().overlay.loading);
        h.session.close_tickets();
        fetch.await.unwrap();

        let overlay = h.session.snapshot().overlay;
        assert_eq!(overlay.category, None);
        assert!(overlay.tickets.is_empty());
    }

    #[tokio::test]
    async fn test_overlay_fetch_error_is_shown() {
        let h = Harness::new();
        h.api.push_page(Err(ApiError::Status {
            status: 500,
            message: "boom".into(),
        }));
        h.session.open_tickets(TicketCategory::Failed).await;

        let overlay = h.session.snapshot().overlay;
        assert_eq!(overlay.category, Some(TicketCategory::Failed));
        assert!(overlay.error.is_some());
        assert!(!overlay.loading);
    }

    // =========================================================================
    // TEARDOWN AND CONCURRENCY
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_teardown_stops_everything() {
        let h = Harness::new();
        h.session.start();
        h.api.push_reply(valid("L1"));
        h.session.validate("QR-1").await.unwrap();
        tokio::time::sleep(Duration::from_millis(1_500)).await;

        h.session.shutdown();
        let frozen = h.session.snapshot();
        let polls = h.api.stats_calls();

        tokio::time::sleep(Duration::from_secs(90)).await;
        let s = h.session.snapshot();
        assert_eq!(s.modal.countdown, frozen.modal.countdown);
        assert_eq!(h.api.stats_calls(), polls);
        assert_eq!(
            h.session.validate("QR-2").await.unwrap_err(),
            ScannerError::TornDown
        );
        assert!(!h.session.refresh_baseline().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_scans_resolve_once_each() {
        let h = Harness::new();
        let scans = 64;
        for i in 0..scans {
            if i % 3 == 0 {
                h.api.push_reply(Ok(ValidateReply::status(410)));
            } else {
                h.api.push_reply(valid(&format!("L{i}")));
            }
        }

        let tasks: Vec<_> = (0..scans)
            .map(|i| {
                let session = Arc::clone(&h.session);
                tokio::spawn(async move { session.validate(&format!("QR-{i}")).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let s = h.session.snapshot();
        let c = s.stats.counters;
        assert_eq!(c.session, scans as u64);
        assert_eq!(c.session, c.session_valid_increment + c.session_failed_increment);
        assert_eq!(s.session_scan_logs.len() as u64, c.session_valid_increment);
        assert_eq!(s.in_flight, 0);
        h.session.shutdown();
    }
}
