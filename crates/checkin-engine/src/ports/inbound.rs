//! # Inbound Port - CheckinScannerApi
//!
//! Driving port used by a front end (the operator console, a UI shell, tests).
//!
//! | Method | Suspends | Mutates counters |
//! |--------|----------|------------------|
//! | `validate` | yes | yes, once per call |
//! | `lookup_ticket` | yes | only through `validate` |
//! | `refresh_baseline` | yes | baselines only |
//! | `close_result` | no | no |
//! | `clear_session` | no | resets |
//! | `decoder_failed` / `resume_decoder` | no | no |
//! | tickets overlay methods | yes | no |

use async_trait::async_trait;

use crate::domain::{
    DecoderError, PageDirection, ScannerError, ScannerSnapshot, TicketCategory, ValidationOutcome,
};

/// Primary API of a scanner session.
#[async_trait]
pub trait CheckinScannerApi: Send + Sync {
    /// Submit a decoded token and apply the resulting outcome.
    ///
    /// # Errors
    /// - `EmptyToken`: blank input, nothing submitted
    /// - `TornDown`: the session was shut down before the outcome applied
    async fn validate(&self, token: &str) -> Result<ValidationOutcome, ScannerError>;

    /// Manual entry: resolve a ticket id to its token, then validate it.
    ///
    /// Lookup failures leave every counter untouched.
    async fn lookup_ticket(&self, ticket_id: &str) -> Result<ValidationOutcome, ScannerError>;

    /// Poll server baselines once. Returns whether fresh baselines were applied.
    async fn refresh_baseline(&self) -> bool;

    /// Dismiss the result dialog and cancel its countdown.
    fn close_result(&self);

    /// Zero all increments, clear the ledger and open a new session.
    fn clear_session(&self);

    /// Report a camera/decoder fault.
    fn decoder_failed(&self, fault: DecoderError);

    /// Operator restarted the decoder.
    fn resume_decoder(&self);

    /// Open the checked-in tickets overlay on a category and load page one.
    async fn open_tickets(&self, category: TicketCategory);

    /// Load the neighbouring page. Returns `false` at a boundary.
    async fn navigate_tickets(&self, direction: PageDirection) -> bool;

    fn close_tickets(&self);

    fn snapshot(&self) -> ScannerSnapshot;

    /// Stop background tasks and drop every later event.
    fn shutdown(&self);
}
