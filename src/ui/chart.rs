//! Circular keyword chart: rings, connectors and rank badges on a canvas, labels on top.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph,
        canvas::{Canvas, Circle, Line as CanvasLine},
    },
};

use crate::logic::geometry::{
    BADGE_RADIUS, CHART_PLANE, CONNECTOR_INNER_RADIUS, CONNECTOR_OUTER_RADIUS, LABEL_RADIUS,
};
use crate::logic::{ChartViewport, polar_offset};
use crate::state::{AppState, Focus, HoverState};
use crate::theme::theme;

use super::helpers::{cell_width, centered_rect, truncate_to_width};

/// Widest label drawn around the ring, in cells.
const MAX_LABEL_WIDTH: u16 = 18;

/// One spoke of the chart, captured before painting.
struct Spoke {
    angle: f64,
    rank: u32,
    highlighted: bool,
}

/// What: Render the keyword chart and record label rects for hit-testing.
///
/// Inputs:
/// - `f`: Frame to render into.
/// - `app`: Mutable state; `chart_rect` and `keyword_rects` are rewritten.
/// - `area`: Pane rect including the border.
///
/// Details:
/// - The canvas spans the logical plane `[-260, 260]²`; logical y grows downward
///   so it is negated for the canvas, whose y grows upward.
/// - Labels are separate widgets placed with [`ChartViewport`] so their rects
///   match what the mouse sees.
pub fn render_chart(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let focused = app.focus == Focus::Chart;
    let block = Block::default()
        .title(Span::styled(
            " Trending ",
            Style::default().fg(th.heading).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { th.accent } else { th.border }))
        .style(Style::default().bg(th.panel));
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.chart_rect = Some(inner);
    app.keyword_rects.clear();
    if inner.width < 4 || inner.height < 3 {
        return;
    }

    if app.keywords.is_empty() {
        let msg = if app.keywords_loading {
            "Loading keywords…"
        } else {
            "No trending keywords"
        };
        let rect = centered_rect(inner, cell_width(msg), 1);
        f.render_widget(
            Paragraph::new(Span::styled(msg, Style::default().fg(th.text_muted))),
            rect,
        );
        return;
    }

    let hovered = app.hover.keyword();
    let spokes: Vec<Spoke> = app
        .keywords
        .iter()
        .map(|k| Spoke {
            angle: k.angle,
            rank: k.rank,
            highlighted: app.selected == Some(k.id) || hovered == Some(k.id),
        })
        .collect();
    let centre_label = app.category_display().to_string();
    let cell_units = CHART_PLANE / f64::from(inner.width);
    let (muted, emphasis, accent, text) = (th.border_muted, th.emphasis, th.accent, th.heading);
    let half = CHART_PLANE / 2.0;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(th.panel)
        .x_bounds([-half, half])
        .y_bounds([-half, half])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: CONNECTOR_INNER_RADIUS,
                color: muted,
            });
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: CONNECTOR_OUTER_RADIUS,
                color: muted,
            });
            for spoke in &spokes {
                let (x1, y1) = polar_offset(spoke.angle, CONNECTOR_INNER_RADIUS);
                let (x2, y2) = polar_offset(spoke.angle, CONNECTOR_OUTER_RADIUS);
                let color: Color = if spoke.highlighted { accent } else { muted };
                ctx.draw(&CanvasLine::new(x1, -y1, x2, -y2, color));
            }
            ctx.layer();
            for spoke in &spokes {
                let (bx, by) = polar_offset(spoke.angle, BADGE_RADIUS);
                ctx.print(
                    bx,
                    -by,
                    Line::from(Span::styled(
                        spoke.rank.to_string(),
                        Style::default().fg(emphasis).add_modifier(Modifier::BOLD),
                    )),
                );
            }
            let shift = f64::from(cell_width(&centre_label)) / 2.0 * cell_units;
            ctx.print(
                -shift,
                0.0,
                Line::from(Span::styled(
                    centre_label.clone(),
                    Style::default().fg(text).add_modifier(Modifier::BOLD),
                )),
            );
        });
    f.render_widget(canvas, inner);

    let viewport = ChartViewport::new(inner);
    let focus_id = app
        .keyword_focus
        .and_then(|i| app.keywords.get(i))
        .map(|k| k.id);
    for kw in &app.keywords {
        let label = truncate_to_width(&kw.text, MAX_LABEL_WIDTH.min(inner.width));
        let rect = viewport.label_rect(polar_offset(kw.angle, LABEL_RADIUS), cell_width(&label));
        let mut style = Style::default().fg(th.text);
        if app.selected == Some(kw.id) {
            style = style
                .fg(th.background)
                .bg(th.accent)
                .add_modifier(Modifier::BOLD);
        } else if matches!(app.hover, HoverState::Stable { keyword, .. } if keyword == kw.id) {
            style = style.fg(th.emphasis).add_modifier(Modifier::BOLD);
        }
        if focus_id == Some(kw.id) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        f.render_widget(Paragraph::new(Span::styled(label, style)), rect);
        app.keyword_rects.push((kw.id, rect));
    }
}
