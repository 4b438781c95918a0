//! Ports layer for the scanner engine.
//!
//! Defines the hexagonal architecture port traits:
//! - Inbound (Driving) ports: API exposed to front ends
//! - Outbound (Driven) ports: REST API, counter store, clock, decoder

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
