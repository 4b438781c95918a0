//! # Check-in Scanner Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # reducer and ledger throughput
//! └── src/integration/  # full sessions against scripted collaborators
//!     ├── flows.rs      # scan outcomes end to end
//!     ├── restore.rs    # persistence across restarts
//!     └── lifecycle.rs  # timers, overlay races, teardown
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p checkin-tests
//! cargo test -p checkin-tests integration::restore
//! cargo bench -p checkin-tests
//! ```

pub mod integration;
