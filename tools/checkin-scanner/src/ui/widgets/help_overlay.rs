//! Help overlay widget.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;

fn binding(key: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<9}", key), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
}

/// Render a centered help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 75, frame.area());

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "CHECKIN SCANNER HELP",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        heading("Scanning"),
        Line::raw(""),
        binding("Enter", "Validate the typed or scanned token"),
        binding("#id", "Look up a ticket id and validate its token"),
        binding("Esc", "Close the result dialog / clear input"),
        Line::raw(""),
        heading("Stats"),
        Line::raw(""),
        binding("F2-F6", "Checked-in tickets: today, session, total, valid, failed"),
        binding("←/→", "Previous / next page"),
        binding("Ctrl-R", "Refresh server totals"),
        binding("Ctrl-L", "Clear session"),
        binding("Ctrl-D", "Restart a halted decoder"),
        binding("Ctrl-Q", "Quit"),
        Line::raw(""),
        heading("Results"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(Color::Green)),
            Span::raw("Valid, counted and logged to this session"),
        ]),
        Line::from(vec![
            Span::styled("  ✗ ", Style::default().fg(Color::Red)),
            Span::raw("Rejected, rate limited or scan limit reached"),
        ]),
        Line::from(vec![
            Span::styled("  ◷ ", Style::default().fg(Color::Yellow)),
            Span::raw("Server unreachable, counted as queued"),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, popup_area);
}
