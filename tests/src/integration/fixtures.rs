//! Shared fixtures for session-level tests.

use std::sync::Arc;

use checkin_engine::{
    ApiError, CounterStore, InMemoryStore, MockScannerApi, MockTimeSource, ScanLogId,
    ScannerConfig, ScannerSession, TicketInfo, ValidateBody, ValidateReply, ValidationInfo,
};

/// 2024-06-01T10:00:00Z
pub const NOW: u64 = 1_717_236_000_000;

pub const HOUR_MS: u64 = 3_600_000;

pub struct Harness {
    pub api: Arc<MockScannerApi>,
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<MockTimeSource>,
    pub session: Arc<ScannerSession>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ScannerConfig::default())
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        let api = Arc::new(MockScannerApi::new());
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(MockTimeSource::new(NOW));
        let session = ScannerSession::new(config, api.clone(), store.clone(), clock.clone())
            .expect("default config is valid");
        Self {
            api,
            store,
            clock,
            session,
        }
    }
}

/// Build a session over an arbitrary store and clock.
pub fn session_over(
    store: Arc<dyn CounterStore>,
    clock: Arc<MockTimeSource>,
    api: Arc<MockScannerApi>,
) -> Arc<ScannerSession> {
    ScannerSession::new(ScannerConfig::default(), api, store, clock).expect("valid config")
}

pub fn valid(scan_log_id: &str) -> Result<ValidateReply, ApiError> {
    Ok(ValidateReply::ok(ValidateBody {
        valid: true,
        scan_log_id: Some(ScanLogId::from(scan_log_id)),
        ..Default::default()
    }))
}

pub fn valid_with_ticket(scan_log_id: &str, attendee: &str) -> Result<ValidateReply, ApiError> {
    Ok(ValidateReply::ok(ValidateBody {
        valid: true,
        scan_log_id: Some(ScanLogId::from(scan_log_id)),
        ticket: Some(TicketInfo {
            ticket_id: Some(format!("T-{}", scan_log_id)),
            attendee_name: Some(attendee.to_string()),
            ticket_type: Some("General".to_string()),
            ..Default::default()
        }),
        validation: Some(ValidationInfo {
            scan_count: Some(1),
            max_scan_count: Some(3),
            ..Default::default()
        }),
        ..Default::default()
    }))
}

pub fn invalid(reason: &str) -> Result<ValidateReply, ApiError> {
    Ok(ValidateReply::ok(ValidateBody {
        valid: false,
        error: Some(reason.to_string()),
        ..Default::default()
    }))
}
