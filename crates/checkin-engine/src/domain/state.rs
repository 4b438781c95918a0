//! # Scanner State and Reducer
//!
//! All session state lives in one [`ScannerState`]. Every mutation is a
//! [`ScannerEvent`] passed through [`reduce`], which applies it against the
//! state current at apply time and returns the [`Effect`]s the service layer
//! must carry out (persistence writes, countdown control, ticket fetches).
//!
//! ## Submission Tracking
//!
//! ```text
//! Submitted{id} ──→ in_flight += id
//! Resolved{id}  ──→ in_flight -= id, apply outcome      (id was in flight)
//!               └─→ ignored                             (unknown / repeated id)
//! ```
//!
//! Each submission therefore reaches exactly one terminal state, producing one
//! feed entry and one `show()` on the presenter.

use std::collections::BTreeSet;

use super::api_types::{CheckedInTicket, TicketsPage};
use super::config::ScannerConfig;
use super::errors::DecoderError;
use super::feed::{ActivityFeed, ScanEvent};
use super::ledger::SessionLedger;
use super::outcome::{OutcomeKind, ValidationOutcome};
use super::persistence::{RestoredSession, ScanLogRecord, StatsRecord};
use super::presenter::{ResultModalState, ResultPresenter, TickOutcome};
use super::stats::{Baselines, ScanStats, StatTile};
use super::tickets::{PageDirection, Pagination, TicketCategory, TicketFetch, TicketsOverlay};
use super::value_objects::{ScanLogId, SubmissionId, Timestamp};

/// What the operator currently sees in place of the camera preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanView {
    /// Live scanning view is open.
    Scanning,
    /// Result dialog covers the scanning view.
    ShowingResult,
    /// Decoder failed; scanning stays halted until the decoder is restarted.
    CameraHalted { fault: DecoderError },
}

/// Validator phase as observed by the operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidatorPhase {
    Idle,
    Submitting,
    Resolved(OutcomeKind),
}

/// Input to the reducer.
#[derive(Clone, Debug)]
pub enum ScannerEvent {
    Submitted { id: SubmissionId },
    Resolved { id: SubmissionId, outcome: ValidationOutcome },
    BaselineFetched(Baselines),
    CountdownTick { generation: u64 },
    CloseResult,
    ClearSession,
    DecoderFailed(DecoderError),
    DecoderResumed,
    OpenTickets(TicketCategory),
    NavigateTickets(PageDirection),
    TicketsLoaded {
        generation: u64,
        result: Result<TicketsPage, String>,
    },
    CloseTickets,
    Shutdown,
}

/// Side effect requested by the reducer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    PersistStats(StatsRecord),
    PersistScanLogs(ScanLogRecord),
    /// Start a countdown for this presenter generation, replacing any other.
    StartCountdown { generation: u64 },
    CancelCountdown,
    FetchTickets(TicketFetch),
}

/// Read-only view of the overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlaySnapshot {
    pub category: Option<TicketCategory>,
    pub pagination: Pagination,
    pub tickets: Vec<CheckedInTicket>,
    pub total: u64,
    pub loading: bool,
    pub error: Option<String>,
}

/// Everything a front end needs to render the scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerSnapshot {
    pub tiles: [(StatTile, u64); 5],
    pub stats: ScanStats,
    pub session_scan_logs: Vec<ScanLogId>,
    pub feed: Vec<ScanEvent>,
    pub modal: ResultModalState,
    pub view: ScanView,
    pub phase: ValidatorPhase,
    pub in_flight: usize,
    pub overlay: OverlaySnapshot,
    pub torn_down: bool,
}

/// Single owner of all scanner session state.
#[derive(Clone, Debug)]
pub struct ScannerState {
    pub stats: ScanStats,
    pub ledger: SessionLedger,
    pub feed: ActivityFeed,
    pub presenter: ResultPresenter,
    pub overlay: TicketsOverlay,
    pub view: ScanView,
    in_flight: BTreeSet<SubmissionId>,
    last_outcome: Option<OutcomeKind>,
    torn_down: bool,
}

impl ScannerState {
    pub fn new(restored: RestoredSession, config: &ScannerConfig) -> Self {
        Self {
            stats: restored.stats,
            ledger: restored.ledger,
            feed: ActivityFeed::new(config.activity_feed_capacity),
            presenter: ResultPresenter::new(config.result_countdown_secs),
            overlay: TicketsOverlay::new(config.tickets_page_limit),
            view: ScanView::Scanning,
            in_flight: BTreeSet::new(),
            last_outcome: None,
            torn_down: false,
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn is_in_flight(&self, id: SubmissionId) -> bool {
        self.in_flight.contains(&id)
    }

    pub fn phase(&self) -> ValidatorPhase {
        if !self.in_flight.is_empty() {
            ValidatorPhase::Submitting
        } else {
            self.last_outcome
                .map(ValidatorPhase::Resolved)
                .unwrap_or(ValidatorPhase::Idle)
        }
    }

    fn stats_record(&self) -> StatsRecord {
        self.stats.to_record()
    }

    fn scan_log_record(&self) -> ScanLogRecord {
        ScanLogRecord::from_ledger(&self.ledger, &self.stats)
    }

    /// Records to write when a session begins without resuming one.
    pub fn persist_all(&self) -> Vec<Effect> {
        vec![
            Effect::PersistStats(self.stats_record()),
            Effect::PersistScanLogs(self.scan_log_record()),
        ]
    }

    /// View to return to once the result dialog is gone.
    fn settle_view(&mut self) {
        if !matches!(self.view, ScanView::CameraHalted { .. }) {
            self.view = if self.presenter.is_open() {
                ScanView::ShowingResult
            } else {
                ScanView::Scanning
            };
        }
    }

    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            tiles: self.stats.tiles(),
            stats: self.stats.clone(),
            session_scan_logs: self.ledger.snapshot(),
            feed: self.feed.to_vec(),
            modal: self.presenter.state(),
            view: self.view.clone(),
            phase: self.phase(),
            in_flight: self.in_flight.len(),
            overlay: OverlaySnapshot {
                category: self.overlay.category(),
                pagination: self.overlay.pagination(),
                tickets: self.overlay.tickets().to_vec(),
                total: self.overlay.total(),
                loading: self.overlay.is_loading(),
                error: self.overlay.error().map(str::to_string),
            },
            torn_down: self.torn_down,
        }
    }
}

/// Apply one event. Events arriving after shutdown change nothing.
pub fn reduce(state: &mut ScannerState, event: ScannerEvent, now: Timestamp) -> Vec<Effect> {
    if state.torn_down {
        return Vec::new();
    }

    match event {
        ScannerEvent::Submitted { id } => {
            state.in_flight.insert(id);
            Vec::new()
        }

        ScannerEvent::Resolved { id, outcome } => {
            if !state.in_flight.remove(&id) {
                return Vec::new();
            }
            apply_outcome(state, outcome, now)
        }

        ScannerEvent::BaselineFetched(baseline) => {
            state.stats.merge_baseline(baseline);
            Vec::new()
        }

        ScannerEvent::CountdownTick { generation } => {
            if state.presenter.tick(generation) == TickOutcome::Expired {
                state.settle_view();
            }
            Vec::new()
        }

        ScannerEvent::CloseResult => {
            if state.presenter.close() {
                state.settle_view();
                vec![Effect::CancelCountdown]
            } else {
                Vec::new()
            }
        }

        ScannerEvent::ClearSession => {
            state.stats.reset(now);
            state.ledger.reset();
            state.persist_all()
        }

        ScannerEvent::DecoderFailed(fault) => {
            state.view = ScanView::CameraHalted { fault };
            Vec::new()
        }

        ScannerEvent::DecoderResumed => {
            if matches!(state.view, ScanView::CameraHalted { .. }) {
                state.view = ScanView::Scanning;
                state.settle_view();
            }
            Vec::new()
        }

        ScannerEvent::OpenTickets(category) => {
            let ids = state.ledger.snapshot();
            vec![Effect::FetchTickets(state.overlay.open(category, &ids))]
        }

        ScannerEvent::NavigateTickets(direction) => {
            let ids = state.ledger.snapshot();
            state
                .overlay
                .navigate(direction, &ids)
                .map(Effect::FetchTickets)
                .into_iter()
                .collect()
        }

        ScannerEvent::TicketsLoaded { generation, result } => {
            state.overlay.apply(generation, result);
            Vec::new()
        }

        ScannerEvent::CloseTickets => {
            state.overlay.close();
            Vec::new()
        }

        ScannerEvent::Shutdown => {
            state.torn_down = true;
            state.in_flight.clear();
            vec![Effect::CancelCountdown]
        }
    }
}

fn apply_outcome(state: &mut ScannerState, outcome: ValidationOutcome, now: Timestamp) -> Vec<Effect> {
    state.stats.record(outcome.counted(), now);
    state.last_outcome = Some(outcome.kind());

    let mut effects = vec![Effect::PersistStats(state.stats_record())];

    if let Some(id) = outcome.scan_log_id() {
        state.ledger.append(id.clone());
        effects.push(Effect::PersistScanLogs(state.scan_log_record()));
    }

    let result = outcome.presentation();
    state.feed.push(ScanEvent {
        timestamp: now,
        kind: result.kind,
        title: result.title.clone(),
        details: result.details.clone(),
        is_test_ticket: outcome.is_test_ticket(),
        ticket_id: outcome.ticket_id(),
    });

    let generation = state.presenter.show(result);
    state.settle_view();
    effects.push(Effect::StartCountdown { generation });
    effects
}
