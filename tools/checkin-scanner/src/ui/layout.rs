//! Main layout orchestration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  CHECKIN  North Gate  http://…/api       ● Scanning  12:04:31   │
//! ├──────────┬──────────┬──────────┬──────────┬─────────────────────┤
//! │ Today    │ Session  │ Total    │ Valid    │ Failed              │
//! │ [F2] 412 │ [F3] 37  │ [F4] 980 │ [F5] 951 │ [F6] 29             │
//! ├──────────┴──────────┴──────────┴──────────┴─────────────────────┤
//! │  ACTIVITY                                                       │
//! │  12:04:29  ✓ Valid Ticket   Attendee: …                         │
//! │  ...                                                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  > TKT-0_                                                       │
//! │  [Enter] Submit  [#id] Lookup  [F1] Help  [Ctrl-Q] Quit         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use checkin_engine::{ScanView, StatTile, ValidatorPhase};

use crate::domain::{App, AppState};

use super::{feed_panel, widgets};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Stat tiles
            Constraint::Min(6),    // Activity feed
            Constraint::Length(4), // Input + keybinds
        ])
        .split(size);

    render_header(frame, main_chunks[0], app);
    render_tiles(frame, main_chunks[1], app);
    feed_panel::render(frame, main_chunks[2], app);
    render_footer(frame, main_chunks[3], app);

    if let Some(snapshot) = &app.snapshot {
        if snapshot.overlay.category.is_some() {
            widgets::render_tickets_overlay(frame, &snapshot.overlay);
        } else if snapshot.modal.is_open {
            widgets::render_result_modal(frame, &snapshot.modal);
        }
    }

    match app.state {
        AppState::Help => widgets::render_help_overlay(frame),
        AppState::ConfirmClear => widgets::render_confirm_clear(frame),
        AppState::Scanning | AppState::Quit => {}
    }
}

/// Render the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            " CHECKIN ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} ", app.location), Style::default().fg(Color::White)),
        Span::styled(format!("{} ", app.endpoint), Style::default().fg(Color::DarkGray)),
    ];

    spans.push(match app.snapshot.as_ref().map(|s| (&s.view, s.phase)) {
        Some((ScanView::CameraHalted { fault }, _)) => Span::styled(
            format!(" ● {} ", fault.operator_message()),
            Style::default().fg(Color::Red),
        ),
        Some((_, ValidatorPhase::Submitting)) => {
            Span::styled(" ● Validating ", Style::default().fg(Color::Yellow))
        }
        Some(_) => Span::styled(" ● Scanning ", Style::default().fg(Color::Green)),
        None => Span::styled(" ○ Starting ", Style::default().fg(Color::DarkGray)),
    });

    // Show last refresh time or error
    spans.push(if let Some(err) = &app.error_message {
        Span::styled(format!(" ⚠ {} ", err), Style::default().fg(Color::Red))
    } else if let Some(time) = app.last_refresh {
        Span::styled(
            format!(" Synced {} ", time.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(" Not synced ", Style::default().fg(Color::DarkGray))
    });

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

/// Render the five stat tiles.
fn render_tiles(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for (i, tile) in StatTile::ALL.iter().enumerate() {
        let value = app
            .snapshot
            .as_ref()
            .and_then(|s| s.tiles.iter().find(|(t, _)| t == tile).map(|(_, v)| *v))
            .unwrap_or(0);

        let color = match tile {
            StatTile::Valid => Color::Green,
            StatTile::Failed => Color::Red,
            _ => Color::White,
        };

        let text = Line::from(vec![
            Span::styled(format!("[F{}] ", i + 2), Style::default().fg(Color::Yellow)),
            Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]);

        let widget = Paragraph::new(text).block(
            Block::default()
                .title(format!(" {} ", tile.label()))
                .title_style(Style::default().fg(Color::Cyan))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(widget, chunks[i]);
    }
}

/// Render the input line and keyboard shortcuts.
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let queued = app
        .snapshot
        .as_ref()
        .map(|s| s.stats.counters.queued)
        .unwrap_or(0);

    let mut input = vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::raw(app.input.clone()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ];
    if queued > 0 {
        input.push(Span::styled(
            format!("   {} queued offline", queued),
            Style::default().fg(Color::Yellow),
        ));
    }

    let keybinds = vec![
        Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" Submit  "),
        Span::styled("[#id]", Style::default().fg(Color::Yellow)),
        Span::raw(" Lookup  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Close  "),
        Span::styled("[Ctrl-R]", Style::default().fg(Color::Yellow)),
        Span::raw(" Sync  "),
        Span::styled("[F1]", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("[Ctrl-Q]", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    let footer = Paragraph::new(vec![Line::from(input), Line::from(keybinds)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(footer, area);
}
