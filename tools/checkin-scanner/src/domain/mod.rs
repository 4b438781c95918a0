//! Domain models for the scanner console.

mod app;

pub use app::{App, AppState, Command};
