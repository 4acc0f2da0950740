use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::state::AppState;
use crate::theme::theme;

/// What: Render the category list and record one hit rect per row.
///
/// Details:
/// - Rows are numbered for the `1`–`9` shortcuts; the active category is highlighted.
pub fn render_sidebar(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let block = Block::default()
        .title(Span::styled(
            " Categories ",
            Style::default().fg(th.heading).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.border))
        .style(Style::default().bg(th.panel));
    let inner = block.inner(area);
    f.render_widget(block, area);

    app.category_rects.clear();
    for (i, cat) in app.categories.iter().enumerate() {
        let Ok(offset) = u16::try_from(i) else { break };
        if offset >= inner.height {
            break;
        }
        let row = Rect::new(inner.x, inner.y + offset, inner.width, 1);
        let active = cat.id == app.category;
        let style = if active {
            Style::default()
                .fg(th.background)
                .bg(th.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.text)
        };
        let line = Line::from(vec![
            Span::styled(format!("{} ", i + 1), Style::default().fg(th.text_muted)),
            Span::styled(cat.display.clone(), style),
        ]);
        f.render_widget(Paragraph::new(line), row);
        app.category_rects.push((cat.id, row));
    }
}
