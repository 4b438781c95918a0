//! # Scanner Session
//!
//! Owns the [`ScannerState`] and executes the reducer's effects.
//!
//! ## Locking
//!
//! The state mutex is never held across an `.await`. Persistence writes and
//! countdown start/cancel run while the lock is held so that the stored
//! records follow the exact order of state changes. Ticket fetches are the
//! only asynchronous effect; they run after the lock is released.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──→ start() ──→ [validate / lookup / poll / overlay ...] ──→ shutdown()
//!   │                                                                   │
//!   └─ restores or starts a session                all later events dropped
//! ```

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::countdown::Countdown;
use super::poller::spawn_baseline_poller;
use super::store::PersistentCounterStore;
use crate::domain::{
    reduce, restore_session, DecoderError, Effect, PageDirection, ScanLogRecord, ScannerConfig,
    ScannerError, ScannerEvent, ScannerSnapshot, ScannerState, StatsRecord, SubmissionId,
    TicketCategory, TicketFetch, TokenFormat, ValidateRequest, ValidationOutcome, SCAN_LOGS_KEY,
    STATS_KEY,
};
use crate::ports::{CheckinScannerApi, CounterStore, ScannerApi, TimeSource, TokenSource};

/// How a decoder loop ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecoderExit {
    /// Source ran out of tokens.
    Exhausted,
    /// Camera fault; scanning is halted until the decoder is restarted.
    Faulted(DecoderError),
    /// Session was shut down.
    TornDown,
}

/// One scanner session.
pub struct ScannerSession {
    config: ScannerConfig,
    api: Arc<dyn ScannerApi>,
    store: PersistentCounterStore,
    clock: Arc<dyn TimeSource>,
    state: Mutex<ScannerState>,
    next_submission: AtomicU64,
    countdown: Countdown,
    poller: Mutex<Option<JoinHandle<()>>>,
    shutdown_tx: watch::Sender<bool>,
    this: Weak<ScannerSession>,
}

impl ScannerSession {
    /// Restore persisted state (or start fresh) and build the session.
    ///
    /// No task is spawned until [`ScannerSession::start`].
    pub fn new(
        config: ScannerConfig,
        api: Arc<dyn ScannerApi>,
        store: Arc<dyn CounterStore>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Arc<Self>, ScannerError> {
        config.validate()?;

        let store = PersistentCounterStore::new(store);
        let now = clock.now();
        let ttl_ms = config.session_ttl().as_millis() as u64;
        let restored = restore_session(
            store.load::<StatsRecord>(STATS_KEY),
            store.load::<ScanLogRecord>(SCAN_LOGS_KEY),
            now,
            ttl_ms,
            config.max_session_scan_logs,
        );

        let state = ScannerState::new(restored.clone(), &config);
        if restored.resumed {
            info!(
                session_start = restored.stats.session_start,
                session = restored.stats.counters.session,
                scan_logs = restored.ledger.len(),
                "resumed scanner session"
            );
        } else {
            info!(session_start = now, "started new scanner session");
            for effect in state.persist_all() {
                persist(&store, &effect);
            }
        }

        let (shutdown_tx, _) = watch::channel(false);

        Ok(Arc::new_cyclic(|this| Self {
            config,
            api,
            store,
            clock,
            state: Mutex::new(state),
            next_submission: AtomicU64::new(1),
            countdown: Countdown::new(),
            poller: Mutex::new(None),
            shutdown_tx,
            this: this.clone(),
        }))
    }

    /// Spawn the baseline poller. Calling it again is a no-op.
    pub fn start(&self) {
        if self.state.lock().is_torn_down() {
            return;
        }
        let mut poller = self.poller.lock();
        if poller.is_none() {
            *poller = Some(spawn_baseline_poller(
                self.this.clone(),
                self.config.baseline_poll_interval,
                self.shutdown_tx.subscribe(),
            ));
            debug!(interval = ?self.config.baseline_poll_interval, "baseline poller started");
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Feed tokens from a decoder until it ends, faults, or the session stops.
    ///
    /// A token that arrives while a result is showing dismisses it first.
    pub async fn run_decoder<T: TokenSource + ?Sized>(&self, source: &mut T) -> DecoderExit {
        while let Some(item) = source.next_token().await {
            match item {
                Ok(token) => {
                    if self.state.lock().presenter.is_open() {
                        self.close_result();
                    }
                    match self.validate(&token).await {
                        Ok(_) => {}
                        Err(ScannerError::TornDown) => return DecoderExit::TornDown,
                        Err(e) => debug!(error = %e, "decoded token rejected"),
                    }
                }
                Err(fault) => {
                    self.decoder_failed(fault.clone());
                    return DecoderExit::Faulted(fault);
                }
            }
        }
        DecoderExit::Exhausted
    }

    /// Run the reducer and its synchronous effects under the state lock.
    ///
    /// Returns the ticket fetches the caller must perform.
    fn dispatch(&self, event: ScannerEvent) -> Vec<TicketFetch> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        let effects = reduce(&mut state, event, now);
        self.run_effects(effects)
    }

    fn run_effects(&self, effects: Vec<Effect>) -> Vec<TicketFetch> {
        let mut fetches = Vec::new();
        for effect in effects {
            match effect {
                Effect::PersistStats(_) | Effect::PersistScanLogs(_) => {
                    persist(&self.store, &effect);
                }
                Effect::StartCountdown { generation } => self.start_countdown(generation),
                Effect::CancelCountdown => self.countdown.cancel(),
                Effect::FetchTickets(fetch) => fetches.push(fetch),
            }
        }
        fetches
    }

    fn start_countdown(&self, generation: u64) {
        let this = self.this.clone();
        self.countdown
            .start(self.config.result_countdown_secs, move || match this.upgrade() {
                Some(session) => session.countdown_tick(generation),
                None => false,
            });
    }

    /// Returns whether the countdown for `generation` is still running.
    fn countdown_tick(&self, generation: u64) -> bool {
        self.dispatch(ScannerEvent::CountdownTick { generation });
        let state = self.state.lock();
        !state.is_torn_down()
            && state.presenter.is_open()
            && state.presenter.generation() == generation
    }

    /// Register a submission. `None` once torn down.
    fn begin_submission(&self) -> Option<SubmissionId> {
        let id = self.next_submission.fetch_add(1, Ordering::Relaxed);
        let now = self.clock.now();
        let mut state = self.state.lock();
        reduce(&mut state, ScannerEvent::Submitted { id }, now);
        state.is_in_flight(id).then_some(id)
    }

    /// Apply a terminal outcome. Returns `false` if it was dropped.
    fn finish_submission(&self, id: SubmissionId, outcome: ValidationOutcome) -> bool {
        let now = self.clock.now();
        let mut state = self.state.lock();
        if !state.is_in_flight(id) {
            return false;
        }
        let effects = reduce(&mut state, ScannerEvent::Resolved { id, outcome }, now);
        self.run_effects(effects);
        true
    }

    async fn run_fetch(&self, fetch: TicketFetch) {
        let result = self
            .api
            .checked_in_tickets(&fetch.query)
            .await
            .map_err(|e| {
                warn!(filter = %fetch.query.filter, error = %e, "checked-in tickets fetch failed");
                e.to_string()
            });
        self.dispatch(ScannerEvent::TicketsLoaded {
            generation: fetch.generation,
            result,
        });
    }
}

fn persist(store: &PersistentCounterStore, effect: &Effect) {
    match effect {
        Effect::PersistStats(record) => {
            store.save(STATS_KEY, record);
        }
        Effect::PersistScanLogs(record) => {
            store.save(SCAN_LOGS_KEY, record);
        }
        _ => {}
    }
}

#[async_trait]
impl CheckinScannerApi for ScannerSession {
    async fn validate(&self, token: &str) -> Result<ValidationOutcome, ScannerError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ScannerError::EmptyToken);
        }

        let id = self.begin_submission().ok_or(ScannerError::TornDown)?;
        let format = TokenFormat::classify(token);
        debug!(submission_id = id, access_method = format.access_method(), "submitting scan");

        let request = ValidateRequest::new(token, &self.config);
        let outcome = match self.api.validate(&request).await {
            Ok(reply) => ValidationOutcome::from_reply(reply),
            Err(e) => {
                warn!(submission_id = id, error = %e, "validation unreachable; scan queued");
                ValidationOutcome::network_failure(e.to_string())
            }
        };

        if !self.finish_submission(id, outcome.clone()) {
            debug!(submission_id = id, "outcome dropped after shutdown");
            return Err(ScannerError::TornDown);
        }

        let ticket_id = outcome.ticket_id().unwrap_or_default();
        info!(
            submission_id = id,
            outcome = outcome.kind().as_str(),
            ticket_id = %ticket_id,
            "scan resolved"
        );
        Ok(outcome)
    }

    async fn lookup_ticket(&self, ticket_id: &str) -> Result<ValidationOutcome, ScannerError> {
        let ticket_id = ticket_id.trim();
        if ticket_id.is_empty() {
            return Err(ScannerError::EmptyToken);
        }
        if self.state.lock().is_torn_down() {
            return Err(ScannerError::TornDown);
        }

        let ticket = self
            .api
            .lookup_ticket(ticket_id)
            .await
            .map_err(|e| {
                warn!(ticket_id, error = %e, "ticket lookup failed");
                ScannerError::Lookup(e)
            })?
            .ok_or_else(|| ScannerError::TicketNotFound(ticket_id.to_string()))?;

        let token = ticket
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ScannerError::TicketNotFound(ticket_id.to_string()))?;

        self.validate(&token).await
    }

    async fn refresh_baseline(&self) -> bool {
        if self.state.lock().is_torn_down() {
            return false;
        }
        match self.api.fetch_stats().await {
            Ok(baseline) => {
                debug!(
                    today = baseline.today,
                    total = baseline.total,
                    valid = baseline.valid,
                    failed = baseline.failed,
                    "baseline refreshed"
                );
                self.dispatch(ScannerEvent::BaselineFetched(baseline));
                !self.state.lock().is_torn_down()
            }
            Err(e) => {
                warn!(error = %e, "baseline poll failed; keeping stale baseline");
                false
            }
        }
    }

    fn close_result(&self) {
        self.dispatch(ScannerEvent::CloseResult);
    }

    fn clear_session(&self) {
        self.dispatch(ScannerEvent::ClearSession);
        info!("scanner session cleared");
    }

    fn decoder_failed(&self, fault: DecoderError) {
        warn!(error = %fault, "decoder halted");
        self.dispatch(ScannerEvent::DecoderFailed(fault));
    }

    fn resume_decoder(&self) {
        self.dispatch(ScannerEvent::DecoderResumed);
    }

    async fn open_tickets(&self, category: TicketCategory) {
        for fetch in self.dispatch(ScannerEvent::OpenTickets(category)) {
            self.run_fetch(fetch).await;
        }
    }

    async fn navigate_tickets(&self, direction: PageDirection) -> bool {
        let fetches = self.dispatch(ScannerEvent::NavigateTickets(direction));
        if fetches.is_empty() {
            return false;
        }
        for fetch in fetches {
            self.run_fetch(fetch).await;
        }
        true
    }

    fn close_tickets(&self) {
        self.dispatch(ScannerEvent::CloseTickets);
    }

    fn snapshot(&self) -> ScannerSnapshot {
        self.state.lock().snapshot()
    }

    fn shutdown(&self) {
        self.dispatch(ScannerEvent::Shutdown);
        self.countdown.cancel();
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.poller.lock().take() {
            handle.abort();
            info!("scanner session shut down");
        }
    }
}

impl Drop for ScannerSession {
    fn drop(&mut self) {
        if let Some(handle) = self.poller.get_mut().take() {
            handle.abort();
        }
    }
}
