//! Clear-session confirmation.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;

pub fn render_confirm_clear(frame: &mut Frame) {
    let popup_area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "Clear this session?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw("Session counters and scan logs are reset."),
        Line::raw("Server totals are unaffected."),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Y  ", Style::default().fg(Color::Yellow)),
            Span::raw("Clear    "),
            Span::styled("any other key  ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(text).centered().block(
        Block::default()
            .title(" Clear Session ")
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(paragraph, popup_area);
}
