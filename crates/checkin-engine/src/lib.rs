//! # Check-in Scanner Engine
//!
//! **Bounded Context:** Festival gate check-in
//! **Architecture:** Hexagonal (domain / ports / adapters / service)
//!
//! ## Purpose
//!
//! Keeps a ticket scanner operating while the network comes and goes. Local
//! scan outcomes accumulate as per-session increments on top of server
//! baselines that are refreshed on an interval. Session-scoped scan-log ids
//! are bounded and persisted, and every outcome is presented through a result
//! dialog with an auto-dismiss countdown.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Tile = baseline + increment | `domain/stats.rs` - `ScanStats::displayed()` |
//! | `session == valid + failed` increments | `domain/stats.rs` - `ScanStats::record()` |
//! | Ledger length ≤ cap, FIFO eviction | `domain/ledger.rs` - `SessionLedger::append()` |
//! | Feed length ≤ capacity, newest first | `domain/feed.rs` - `ActivityFeed::push()` |
//! | One terminal state per submission | `domain/state.rs` - `reduce()` in-flight set |
//! | Stale countdown ticks ignored | `domain/presenter.rs` - generations |
//! | Nothing applies after shutdown | `domain/state.rs` - `reduce()` torn-down guard |
//!
//! ## Validation Flow
//!
//! ```text
//! decoded token ──→ validate() ──→ POST /tickets/validate
//!                                        │
//!          ┌─────────────────────────────┼───────────────────────────┐
//!          ↓                             ↓                           ↓
//!     429 / 410 / invalid             valid                   no response
//!     failed += 1                     valid += 1              queued += 1
//!     session += 1                    session += 1
//!                                     ledger.append(scanLogId)
//!          └──────────────→ feed.push() + presenter.show() ←─────────┘
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - HttpScannerApi, JsonFileStore, InMemoryStore       │
//! │  service/  - ScannerSession, Countdown, baseline poller         │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements / drives ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - CheckinScannerApi                          │
//! │  ports/outbound.rs - ScannerApi, CounterStore, TimeSource,      │
//! │                      TokenSource                                │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/ - ScannerState + reduce(), stats, ledger, feed,        │
//! │            presenter, outcome, tickets, persistence, config     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queued scans are counted and surfaced but never retried.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
pub use service::*;
