//! Activity feed and session summary.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use checkin_engine::{ResultKind, ScanEvent, Timestamp};

use crate::domain::App;

/// Render the feed (left) and session panel (right).
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(30)])
        .split(area);

    render_feed(frame, chunks[0], app);
    render_session(frame, chunks[1], app);
}

fn render_feed(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .snapshot
        .as_ref()
        .map(|s| s.feed.iter().map(feed_item).collect())
        .unwrap_or_default();

    let list = List::new(items).block(
        Block::default()
            .title(" ACTIVITY ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(list, area);
}

fn feed_item(event: &ScanEvent) -> ListItem<'static> {
    let (indicator, color) = kind_style(event.kind);
    let first_detail = event.details.lines().next().unwrap_or_default().to_string();

    let mut spans = vec![
        Span::styled(
            format!("{}  ", clock_time(event.timestamp)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{} ", indicator), Style::default().fg(color)),
        Span::styled(
            format!("{:<16}", event.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(first_detail),
    ];
    if event.is_test_ticket {
        spans.push(Span::styled(" [TEST]", Style::default().fg(Color::Magenta)));
    }

    ListItem::new(Line::from(spans))
}

fn render_session(frame: &mut Frame, area: Rect, app: &App) {
    let lines = match &app.snapshot {
        Some(s) => {
            let started = clock_time(s.stats.session_start);
            vec![
                Line::from(vec![Span::raw("Started:  "), Span::raw(started)]),
                Line::from(vec![
                    Span::raw("Scan logs: "),
                    Span::raw(s.session_scan_logs.len().to_string()),
                ]),
                Line::from(vec![
                    Span::raw("Queued:   "),
                    Span::styled(
                        s.stats.counters.queued.to_string(),
                        Style::default().fg(if s.stats.counters.queued > 0 {
                            Color::Yellow
                        } else {
                            Color::White
                        }),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("Pending:  "),
                    Span::raw(s.in_flight.to_string()),
                ]),
                Line::raw(""),
                Line::from(Span::styled(
                    "Ctrl-L clears the session",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        }
        None => vec![Line::raw("No session")],
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" SESSION ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(paragraph, area);
}

/// Indicator and colour for a result category.
pub fn kind_style(kind: ResultKind) -> (&'static str, Color) {
    match kind {
        ResultKind::Success => ("✓", Color::Green),
        ResultKind::Error => ("✗", Color::Red),
        ResultKind::Queued => ("◷", Color::Yellow),
    }
}

/// Local wall-clock `HH:MM:SS` for an epoch-millisecond timestamp.
pub fn clock_time(ts: Timestamp) -> String {
    DateTime::from_timestamp_millis(ts as i64)
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}
