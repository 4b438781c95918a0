//! Popup widgets drawn over the scanning view.

mod confirm;
mod help_overlay;
mod result_modal;
mod tickets_overlay;

pub use confirm::render_confirm_clear;
pub use help_overlay::render_help_overlay;
pub use result_modal::render_result_modal;
pub use tickets_overlay::render_tickets_overlay;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Create a centered rectangle.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
