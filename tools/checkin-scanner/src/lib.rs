//! Check-in Scanner: gate console for the check-in engine.
//!
//! A TUI that turns keyboard-wedge input into validation requests and shows
//! the live stat tiles, activity feed, result dialog and checked-in tickets.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  CHECKIN  North Gate                          ● Scanning        │
//! ├──────────┬──────────┬──────────┬──────────┬─────────────────────┤
//! │  Today   │ Session  │  Total   │  Valid   │  Failed             │
//! ├──────────┴──────────┴──────────┴──────────┴──────┬──────────────┤
//! │  ACTIVITY                                        │  SESSION     │
//! ├──────────────────────────────────────────────────┴──────────────┤
//! │  > _                                                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod settings;
pub mod ui;

pub use adapters::{wedge_channel, Delivery, WedgeSender, WedgeTokenSource};
pub use domain::{App, AppState, Command};
