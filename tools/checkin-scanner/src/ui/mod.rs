//! UI module - TUI rendering components.
//!
//! - `layout.rs`: header, stat tiles, input line
//! - `feed_panel.rs`: activity feed + session summary
//! - `widgets/`: result dialog, tickets overlay, help, confirmation

mod feed_panel;
mod layout;

pub mod widgets;

pub use feed_panel::{clock_time, kind_style};
pub use layout::render;
