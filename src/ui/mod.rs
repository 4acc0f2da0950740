//! Dashboard rendering.
//!
//! `ui` draws one frame and records the rects the mouse handlers hit-test
//! against (keyword labels, feed rows, category rows).

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::state::AppState;
use crate::theme::theme;

mod chart;
mod composer;
mod feed;
mod header;
pub mod helpers;
mod modals;
mod sentiment;
mod sidebar;

pub use modals::KEYBINDS;

/// Width of the category sidebar.
const SIDEBAR_WIDTH: u16 = 14;

/// What: Render a full frame of the dashboard.
///
/// Inputs:
/// - `f`: Frame to render into.
/// - `app`: Mutable state; viewport and hit-test rects are rewritten.
///
/// Details:
/// - Layout: header, then sidebar | chart | feed, then the composer while a keyword
///   is selected, then the optional key binding footer.
/// - The sentiment popup and modals draw last, over everything else.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();
    app.viewport = area;
    f.render_widget(Block::default().style(Style::default().bg(th.background)), area);

    let composer_h = if app.selected.is_some() {
        composer::COMPOSER_HEIGHT
    } else {
        0
    };
    let footer_h = u16::from(app.show_keybinds_footer);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(composer_h),
            Constraint::Length(footer_h),
        ])
        .split(area);

    header::render_header(f, app, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Percentage(55),
            Constraint::Min(24),
        ])
        .split(rows[1]);
    sidebar::render_sidebar(f, app, body[0]);
    chart::render_chart(f, app, body[1]);
    feed::render_feed(f, app, body[2]);

    if composer_h > 0 {
        composer::render_composer(f, app, rows[2]);
    }
    if footer_h > 0 {
        render_footer(f, rows[3]);
    }
    sentiment::render_sentiment_popup(f, app);
    modals::render_modals(f, app, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let th = theme();
    let mut spans = Vec::new();
    for (keys, action) in KEYBINDS.iter().take(9) {
        spans.push(Span::styled(format!(" {keys} "), Style::default().fg(th.background).bg(th.accent)));
        spans.push(Span::styled(format!(" {action}  "), Style::default().fg(th.text_muted)));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(th.panel)),
        area,
    );
}
