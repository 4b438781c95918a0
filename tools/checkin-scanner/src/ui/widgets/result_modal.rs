//! Result dialog with its auto-dismiss countdown.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use checkin_engine::ResultModalState;

use super::centered_rect;
use crate::ui::kind_style;

pub fn render_result_modal(frame: &mut Frame, modal: &ResultModalState) {
    let Some(result) = &modal.result else {
        return;
    };
    let (indicator, color) = kind_style(result.kind);

    let popup_area = centered_rect(50, 40, frame.area());
    frame.render_widget(Clear, popup_area);

    let mut text = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("{} {}", indicator, result.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    text.extend(result.details.lines().map(|l| Line::raw(l.to_string())));
    text.push(Line::raw(""));
    text.push(Line::from(Span::styled(
        format!("Closing in {}s  [Esc] close", modal.countdown),
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(text)
        .centered()
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {} ", result.kind.as_str().to_uppercase()))
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(paragraph, popup_area);
}
