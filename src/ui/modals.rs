use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::state::{AppState, Modal};
use crate::theme::theme;

use super::helpers::centered_rect;

/// Key binding reference: `(keys, action)`.
pub const KEYBINDS: [(&str, &str); 12] = [
    ("←/→", "focus keyword"),
    ("Enter", "select keyword / like"),
    ("Tab", "switch pane"),
    ("↑/↓ j/k", "move in feed"),
    ("l", "like comment"),
    ("d", "delete own comment"),
    ("1-5", "switch category"),
    ("r", "refresh comments"),
    ("Esc", "close / leave"),
    ("?", "help"),
    ("q", "quit"),
    ("Ctrl+C", "quit"),
];

/// Render the active modal, if any.
pub fn render_modals(f: &mut Frame, app: &AppState, area: Rect) {
    match &app.modal {
        Modal::None => {}
        Modal::Alert { message } => render_alert(f, area, message),
        Modal::Help => render_help(f, area),
    }
}

/// What: Centered message box; any key dismisses it.
fn render_alert(f: &mut Frame, area: Rect, message: &str) {
    let th = theme();
    let w = area.width.saturating_sub(8).min(60);
    let rect = centered_rect(area, w, 7);
    f.render_widget(Clear, rect);
    let lines = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(th.text))),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(th.text_muted),
        )),
    ];
    let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(
                " Error ",
                Style::default().fg(th.negative).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(th.negative))
            .style(Style::default().bg(th.panel)),
    );
    f.render_widget(body, rect);
}

fn render_help(f: &mut Frame, area: Rect) {
    let th = theme();
    let h = u16::try_from(KEYBINDS.len()).unwrap_or(u16::MAX) + 4;
    let rect = centered_rect(area, 44, h);
    f.render_widget(Clear, rect);
    let mut lines: Vec<Line<'static>> = KEYBINDS
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{keys:10}"),
                    Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled((*action).to_string(), Style::default().fg(th.text)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc / Enter / ? to close",
        Style::default().fg(th.text_muted),
    )));
    let body = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(
                " Help ",
                Style::default().fg(th.heading).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(th.heading))
            .style(Style::default().bg(th.panel)),
    );
    f.render_widget(body, rect);
}
