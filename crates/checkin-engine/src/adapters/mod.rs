//! Adapters: concrete implementations of the outbound ports.
//!
//! - `http`: reqwest client for the check-in REST API
//! - `file_store`: JSON-file counter store
//! - `memory_store`: in-memory counter store for tests and ephemeral runs

pub mod file_store;
pub mod http;
pub mod memory_store;

pub use file_store::JsonFileStore;
pub use http::HttpScannerApi;
pub use memory_store::InMemoryStore;
