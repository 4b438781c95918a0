//! # Outbound Ports
//!
//! Dependencies the scanner engine drives: the check-in REST API, the
//! durable counter store, the clock, and the camera decoder.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::{
    ApiError, Baselines, DecoderError, StoreError, TicketInfo, TicketsPage, TicketsQuery,
    Timestamp, ValidateReply, ValidateRequest,
};

/// Check-in REST API.
#[async_trait]
pub trait ScannerApi: Send + Sync {
    /// `POST /tickets/validate`.
    ///
    /// Any HTTP response is `Ok`, including 4xx/5xx. `Err` means no response
    /// was received at all.
    async fn validate(&self, request: &ValidateRequest) -> Result<ValidateReply, ApiError>;

    /// `GET /admin/scanner-stats`.
    async fn fetch_stats(&self) -> Result<Baselines, ApiError>;

    /// Checked-in tickets for one category and page.
    async fn checked_in_tickets(&self, query: &TicketsQuery) -> Result<TicketsPage, ApiError>;

    /// `GET /tickets?ticket_id=`. `Ok(None)` when the ticket does not exist.
    async fn lookup_ticket(&self, ticket_id: &str) -> Result<Option<TicketInfo>, ApiError>;
}

/// Durable key-value storage.
///
/// Implementations report failures; the engine decides to swallow them.
///
/// `save` is called synchronously while the session's state lock is held, so
/// records land in the order the state changed. Implementations must be fast
/// and must not block on anything slower than a local disk write of a few
/// hundred bytes.
pub trait CounterStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError>;
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Camera decoder producing decoded token strings.
#[async_trait]
pub trait TokenSource: Send {
    /// Next decoded token or fault. `None` once the source is exhausted.
    async fn next_token(&mut self) -> Option<Result<String, DecoderError>>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Scripted REST API.
///
/// Validate replies are consumed in order; with the script empty every call
/// fails as a connection error.
#[derive(Default)]
pub struct MockScannerApi {
    replies: Mutex<VecDeque<Result<ValidateReply, ApiError>>>,
    stats: Mutex<Option<Result<Baselines, ApiError>>>,
    pages: Mutex<VecDeque<Result<TicketsPage, ApiError>>>,
    tickets: Mutex<HashMap<String, TicketInfo>>,
    requests: Mutex<Vec<ValidateRequest>>,
    queries: Mutex<Vec<TicketsQuery>>,
    stats_calls: AtomicU64,
    delay: Mutex<Option<Duration>>,
}

impl MockScannerApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: Result<ValidateReply, ApiError>) -> &Self {
        self.replies.lock().push_back(reply);
        self
    }

    pub fn set_stats(&self, stats: Result<Baselines, ApiError>) {
        *self.stats.lock() = Some(stats);
    }

    pub fn push_page(&self, page: Result<TicketsPage, ApiError>) {
        self.pages.lock().push_back(page);
    }

    pub fn add_ticket(&self, ticket_id: &str, ticket: TicketInfo) {
        self.tickets.lock().insert(ticket_id.to_string(), ticket);
    }

    /// Hold every validate and tickets response for `delay`.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn requests(&self) -> Vec<ValidateRequest> {
        self.requests.lock().clone()
    }

    pub fn queries(&self) -> Vec<TicketsQuery> {
        self.queries.lock().clone()
    }

    pub fn stats_calls(&self) -> u64 {
        self.stats_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ScannerApi for MockScannerApi {
    async fn validate(&self, request: &ValidateRequest) -> Result<ValidateReply, ApiError> {
        self.requests.lock().push(request.clone());
        let reply = self.replies.lock().pop_front();
        self.pause().await;
        reply.unwrap_or_else(|| Err(ApiError::Connection("no scripted reply".to_string())))
    }

    async fn fetch_stats(&self) -> Result<Baselines, ApiError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        self.stats.lock().clone().unwrap_or(Ok(Baselines::default()))
    }

    async fn checked_in_tickets(&self, query: &TicketsQuery) -> Result<TicketsPage, ApiError> {
        self.queries.lock().push(query.clone());
        let page = self.pages.lock().pop_front();
        self.pause().await;
        page.unwrap_or_else(|| Ok(TicketsPage::default()))
    }

    async fn lookup_ticket(&self, ticket_id: &str) -> Result<Option<TicketInfo>, ApiError> {
        Ok(self.tickets.lock().get(ticket_id).cloned())
    }
}

/// Mock time source for testing.
pub struct MockTimeSource {
    time: AtomicU64,
}

impl MockTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}

/// Token source replaying a fixed script.
#[derive(Debug, Default)]
pub struct ScriptedTokenSource {
    items: VecDeque<Result<String, DecoderError>>,
}

impl ScriptedTokenSource {
    pub fn new(items: impl IntoIterator<Item = Result<String, DecoderError>>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }
}

#[async_trait]
impl TokenSource for ScriptedTokenSource {
    async fn next_token(&mut self) -> Option<Result<String, DecoderError>> {
        self.items.pop_front()
    }
}
