use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::state::{AppState, MAX_COMMENT_CHARS};
use crate::theme::theme;

/// Rows taken by the composer pane, borders included.
pub const COMPOSER_HEIGHT: u16 = 8;

/// What: Render the comment history and input box for the selected keyword.
///
/// Details:
/// - Shows the most recent history entries that fit above the input line.
/// - The input line shows a character counter and a `sending…` marker while a
///   submission is in flight.
pub fn render_composer(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let Some(keyword) = app.selected else {
        return;
    };
    let name = app.keyword(keyword).map_or("", |k| k.text.as_str());
    let block = Block::default()
        .title(Span::styled(
            format!(" {name} "),
            Style::default().fg(th.heading).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.accent))
        .style(Style::default().bg(th.panel));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let history_rows = usize::from(inner.height.saturating_sub(1));
    let mut lines: Vec<Line<'static>> = Vec::new();
    if app.details_loading.contains(&keyword) {
        lines.push(Line::from(Span::styled(
            "Loading comments…",
            Style::default().fg(th.text_muted),
        )));
    } else {
        let history = app.details.get(&keyword).map_or(&[][..], Vec::as_slice);
        if history.is_empty() {
            lines.push(Line::from(Span::styled(
                "Be the first to comment",
                Style::default().fg(th.text_muted),
            )));
        }
        let skip = history.len().saturating_sub(history_rows);
        for d in &history[skip..] {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", crate::logic::format_timestamp(d.created_at)),
                    Style::default().fg(th.text_muted),
                ),
                Span::styled(d.text.clone(), Style::default().fg(th.text)),
                Span::styled(format!("  ♥ {}", d.likes), Style::default().fg(th.text_muted)),
            ]));
        }
    }
    lines.truncate(history_rows);
    let history_rect = Rect::new(inner.x, inner.y, inner.width, inner.height - 1);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), history_rect);

    let count = app.composer.text.chars().count();
    let status = if app.composer.submitting {
        "sending…".to_string()
    } else {
        format!("{count}/{MAX_COMMENT_CHARS}")
    };
    let input = Line::from(vec![
        Span::styled("> ", Style::default().fg(th.accent)),
        Span::styled(app.composer.text.clone(), Style::default().fg(th.text)),
        Span::styled("▏", Style::default().fg(th.accent)),
        Span::styled(format!("  {status}"), Style::default().fg(th.text_muted)),
    ]);
    let input_rect = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    f.render_widget(
        Paragraph::new(input).style(Style::default().bg(th.surface)),
        input_rect,
    );
}
