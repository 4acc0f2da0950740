use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::logic::{format_timestamp, mask_origin};
use crate::state::{AppState, Comment, Focus};
use crate::theme::{Theme, theme};

use super::helpers::{cell_width, centered_rect, truncate_to_width};

/// Rows per feed entry.
const ROW_HEIGHT: u16 = 2;

/// What: Render the live comment feed and record one hit rect per visible entry.
///
/// Details:
/// - The window scrolls so the highlighted entry stays visible.
/// - Popular comments carry a `★` marker; liked ones a filled heart.
pub fn render_feed(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let focused = app.focus == Focus::Feed;
    let title = format!(" Live comments ({}) ", app.comments.len());
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(th.heading).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { th.accent } else { th.border }))
        .style(Style::default().bg(th.panel));
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.feed_rect = Some(inner);
    app.feed_rows.clear();

    if app.comments.is_empty() {
        let msg = if app.comments_loading {
            "Loading comments…"
        } else {
            "No comments yet"
        };
        let rect = centered_rect(inner, cell_width(msg), 1);
        f.render_widget(
            Paragraph::new(Span::styled(msg, Style::default().fg(th.text_muted))),
            rect,
        );
        return;
    }

    let visible = usize::from((inner.height / ROW_HEIGHT).max(1));
    let start = app.feed_selected.saturating_sub(visible - 1);
    let rows: Vec<(usize, Vec<Line<'static>>)> = app
        .comments
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(i, c)| (i, comment_lines(app, c, i == app.feed_selected, inner.width, &th)))
        .collect();
    for (slot, (index, lines)) in rows.into_iter().enumerate() {
        let Ok(slot) = u16::try_from(slot) else { break };
        let y = inner.y + slot * ROW_HEIGHT;
        let height = ROW_HEIGHT.min(inner.y + inner.height - y);
        let rect = Rect::new(inner.x, y, inner.width, height);
        let style = if index == app.feed_selected && focused {
            Style::default().bg(th.surface)
        } else {
            Style::default()
        };
        f.render_widget(Paragraph::new(lines).style(style), rect);
        app.feed_rows.push((index, rect));
    }
}

/// Two display lines for one comment: keyword and text, then author meta.
fn comment_lines(
    app: &AppState,
    c: &Comment,
    highlighted: bool,
    width: u16,
    th: &Theme,
) -> Vec<Line<'static>> {
    let marker = if highlighted { "▶ " } else { "  " };
    let mut head = vec![Span::styled(marker, Style::default().fg(th.accent))];
    if c.popular {
        head.push(Span::styled("★ ", Style::default().fg(th.warning)));
    }
    let tag = format!("[{}] ", c.keyword_name);
    let used = cell_width(marker) + cell_width(&tag) + if c.popular { 2 } else { 0 };
    head.push(Span::styled(
        tag,
        Style::default().fg(th.emphasis).add_modifier(Modifier::BOLD),
    ));
    head.push(Span::styled(
        truncate_to_width(&c.text, width.saturating_sub(used)),
        Style::default().fg(th.text),
    ));

    let liked = app.is_liked(c.id);
    let heart = if liked { "♥" } else { "♡" };
    let mut meta = vec![
        Span::raw("  "),
        Span::styled(
            format!("{} {} · {}", c.author, mask_origin(&c.origin), format_timestamp(c.created_at)),
            Style::default().fg(th.text_muted),
        ),
        Span::styled(
            format!("  {heart} {}", c.likes),
            Style::default().fg(if liked { th.negative } else { th.text_muted }),
        ),
    ];
    if app.is_own(c) {
        meta.push(Span::styled("  (mine)", Style::default().fg(th.accent)));
    }
    vec![Line::from(head), Line::from(meta)]
}
