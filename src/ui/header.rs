use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::logic::keywords::format_last_updated;
use crate::state::AppState;
use crate::theme::theme;

use super::helpers::cell_width;

/// What: Render the title bar: app name, active category, last keyword update and clock.
pub fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let updated = app
        .last_updated
        .map_or_else(|| "--:--:--".to_string(), format_last_updated);
    let left = Line::from(vec![
        Span::styled(
            " trendboard ",
            Style::default().fg(th.heading).add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(th.border_muted)),
        Span::styled(
            app.category_display().to_string(),
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  last updated {updated}"),
            Style::default().fg(th.text_muted),
        ),
    ]);
    let clock = app.now.format("%Y-%m-%d %H:%M:%S").to_string();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.border))
        .style(Style::default().bg(th.panel));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(left).style(Style::default().fg(th.text)), inner);

    let w = cell_width(&clock) + 1;
    if inner.width > w {
        let rect = Rect::new(inner.x + inner.width - w, inner.y, w, 1);
        f.render_widget(
            Paragraph::new(Span::styled(clock, Style::default().fg(th.text_muted))),
            rect,
        );
    }
}
