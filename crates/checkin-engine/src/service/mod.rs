//! Service layer: drives the pure domain with real time and real I/O.
//!
//! - `session`: `ScannerSession`, the `CheckinScannerApi` implementation
//! - `countdown`: cancellable one-second countdown task
//! - `poller`: interval baseline poll with watch-channel shutdown
//! - `store`: typed wrapper that logs and swallows storage failures

pub mod countdown;
pub mod poller;
pub mod session;
pub mod store;

pub use countdown::Countdown;
pub use poller::spawn_baseline_poller;
pub use session::{DecoderExit, ScannerSession};
pub use store::PersistentCounterStore;
