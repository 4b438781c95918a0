//! # Domain Layer - Check-in Scanner
//!
//! Pure session logic. Nothing in here performs I/O or reads the clock;
//! timestamps are passed in by the service layer.
//!
//! ## Components
//!
//! - `stats`: `ScanStats` tiles (baseline + increment)
//! - `ledger`: `SessionLedger` bounded FIFO of scan-log ids
//! - `feed`: `ActivityFeed` most-recent-first scan log
//! - `presenter`: `ResultPresenter` dialog + countdown state machine
//! - `outcome`: classification of validate responses
//! - `tickets`: `TicketsOverlay` category listing with pagination
//! - `persistence`: stored records and restore rules
//! - `state`: `ScannerState` and the `reduce` function
//! - `config`, `errors`, `value_objects`, `api_types`

pub mod api_types;
pub mod config;
pub mod errors;
pub mod feed;
pub mod ledger;
pub mod outcome;
pub mod persistence;
pub mod presenter;
pub mod state;
pub mod stats;
pub mod tickets;
pub mod value_objects;

pub use api_types::*;
pub use config::*;
pub use errors::*;
pub use feed::*;
pub use ledger::*;
pub use outcome::*;
pub use persistence::*;
pub use presenter::*;
pub use state::*;
pub use stats::*;
pub use tickets::*;
pub use value_objects::*;
