//! Checked-in tickets overlay.
//!
//! ```text
//! ┌ Valid: 951 tickets ─────────────────────────────────┐
//! │ Ticket      Attendee        Type      Scanned       │
//! │ T-0042      Ada Lovelace    VIP       12:01:55      │
//! │ ...                                                 │
//! │                 ← Page 2 / 48 →                     │
//! └─────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use checkin_engine::OverlaySnapshot;

use super::centered_rect;

pub fn render_tickets_overlay(frame: &mut Frame, overlay: &OverlaySnapshot) {
    let Some(category) = overlay.category else {
        return;
    };

    let popup_area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, popup_area);

    let title = format!(
        " {}: {} tickets ",
        capitalize(category.as_str()),
        overlay.total
    );
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    if overlay.loading {
        frame.render_widget(
            Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray)),
            chunks[0],
        );
    } else if let Some(error) = &overlay.error {
        frame.render_widget(
            Paragraph::new(format!("⚠ {}", error)).style(Style::default().fg(Color::Red)),
            chunks[0],
        );
    } else if overlay.tickets.is_empty() {
        frame.render_widget(
            Paragraph::new("No checked-in tickets").style(Style::default().fg(Color::DarkGray)),
            chunks[0],
        );
    } else {
        let rows = overlay.tickets.iter().map(|t| {
            let id_style = if t.is_test_ticket {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(t.ticket_id.clone()).style(id_style),
                Cell::from(t.attendee_name.clone().unwrap_or_default()),
                Cell::from(t.ticket_type.clone().unwrap_or_default()),
                Cell::from(t.scanned_at.clone().unwrap_or_default()),
            ])
        });
        let header = Row::new(vec!["Ticket", "Attendee", "Type", "Scanned"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let table = Table::new(
            rows,
            [
                Constraint::Length(14),
                Constraint::Min(16),
                Constraint::Length(12),
                Constraint::Length(22),
            ],
        )
        .header(header);
        frame.render_widget(table, chunks[0]);
    }

    let page = &overlay.pagination;
    let arrow = |enabled: bool, s: &'static str| {
        Span::styled(
            s,
            Style::default().fg(if enabled { Color::Yellow } else { Color::DarkGray }),
        )
    };
    let nav = Line::from(vec![
        arrow(page.has_prev, "← "),
        Span::raw(format!("Page {} / {}", page.page, page.total_pages.max(1))),
        arrow(page.has_next, " →"),
        Span::styled("   [Esc] close", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(nav).centered(), chunks[1]);
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
