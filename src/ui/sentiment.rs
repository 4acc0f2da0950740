//! Sentiment popup shown once a keyword hover becomes stable.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph, Wrap,
        canvas::{Canvas, Points},
    },
};

use crate::logic::sentiment::TRACK_RADIUS;
use crate::logic::{donut_arcs, percentages, polar_offset, popup_rect};
use crate::state::{AppState, HoverState, SentimentSnapshot, SentimentStatus};
use crate::theme::theme;

/// Half extent of the donut canvas in logical units.
const DONUT_BOUNDS: f64 = TRACK_RADIUS + 10.0;
/// Ring thickness in logical units.
const RING_WIDTH: f64 = 6.0;

/// What: Sample the donut ring between two angles (degrees, 0° up, clockwise).
///
/// Output:
/// - Canvas points with y pointing up.
fn ring_points(from_deg: f64, to_deg: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let mut angle = from_deg;
    while angle < to_deg {
        let mut r = TRACK_RADIUS - RING_WIDTH / 2.0;
        while r <= TRACK_RADIUS + RING_WIDTH / 2.0 {
            let (x, y) = polar_offset(angle, r);
            out.push((x, -y));
            r += 1.5;
        }
        angle += 1.5;
    }
    out
}

/// What: Render the popup for a stable hover; nothing otherwise.
///
/// Details:
/// - Placed at the frozen anchor through `popup_rect`, above the anchor in the
///   lower half of the screen.
/// - An uncomputed snapshot shows its message in place of the donut.
pub fn render_sentiment_popup(f: &mut Frame, app: &AppState) {
    let HoverState::Stable { keyword, anchor } = app.hover else {
        return;
    };
    let Some(snapshot) = app.sentiments.get(&keyword) else {
        return;
    };
    let th = theme();
    let rect = popup_rect(anchor, app.viewport);
    let name = app.keyword(keyword).map_or("", |k| k.text.as_str());
    f.render_widget(Clear, rect);
    let block = Block::default()
        .title(Span::styled(
            format!(" {name} "),
            Style::default().fg(th.heading).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(th.heading))
        .style(Style::default().bg(th.panel));
    let inner = block.inner(rect);
    f.render_widget(block, rect);
    if inner.height < 2 {
        return;
    }

    if let SentimentStatus::Uncomputed { message } = &snapshot.status {
        f.render_widget(
            Paragraph::new(Span::styled(message.clone(), Style::default().fg(th.text_muted)))
                .wrap(Wrap { trim: true }),
            Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1),
        );
        return;
    }

    let donut = Rect::new(inner.x, inner.y, inner.width, inner.height - 1);
    render_donut(f, snapshot, donut);
    f.render_widget(
        Paragraph::new(summary_line(snapshot)),
        Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1),
    );
}

fn render_donut(f: &mut Frame, snapshot: &SentimentSnapshot, area: Rect) {
    let th = theme();
    let arcs = donut_arcs(snapshot);
    let split = arcs.positive_degrees();
    let empty = arcs.positive == 0.0 && arcs.negative == 0.0;
    let (track, pos_color, neg_color) = if snapshot.status == SentimentStatus::Placeholder {
        (th.border_muted, th.text_muted, th.border_muted)
    } else {
        (th.border_muted, th.positive, th.negative)
    };
    let positive = ring_points(0.0, split);
    let negative = ring_points(split, 360.0);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(th.panel)
        .x_bounds([-DONUT_BOUNDS, DONUT_BOUNDS])
        .y_bounds([-DONUT_BOUNDS, DONUT_BOUNDS])
        .paint(move |ctx| {
            if empty {
                ctx.draw(&Points {
                    coords: &negative,
                    color: track,
                });
                return;
            }
            ctx.draw(&Points {
                coords: &positive,
                color: pos_color,
            });
            ctx.draw(&Points {
                coords: &negative,
                color: neg_color,
            });
        });
    f.render_widget(canvas, area);
}

fn summary_line(snapshot: &SentimentSnapshot) -> Line<'static> {
    let th = theme();
    if snapshot.status == SentimentStatus::Placeholder {
        return Line::from(Span::styled(
            " analysing…",
            Style::default().fg(th.text_muted),
        ));
    }
    let (pos, neg) = percentages(snapshot);
    Line::from(vec![
        Span::styled(
            format!(" + {pos}%"),
            Style::default().fg(th.positive).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("- {neg}%"),
            Style::default().fg(th.negative).add_modifier(Modifier::BOLD),
        ),
    ])
}
