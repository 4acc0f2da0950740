//! Sentiment donut model: percentages, arc lengths and popup placement.

use ratatui::layout::Rect;

use crate::state::{CellPos, SentimentSnapshot};

/// Radius of the donut track in logical units.
pub const TRACK_RADIUS: f64 = 36.0;
/// Popup width in cells.
pub const POPUP_WIDTH: u16 = 28;
/// Popup height in cells.
pub const POPUP_HEIGHT: u16 = 12;
/// Minimum distance between the popup and the viewport border / pointer.
pub const POPUP_MARGIN: u16 = 1;

/// What: Rounded positive/negative percentages of a snapshot.
///
/// Output:
/// - `(0, 0)` when both weights are zero, otherwise each share of the total rounded.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percentages(snapshot: &SentimentSnapshot) -> (u32, u32) {
    let total = f64::from(snapshot.positive) + f64::from(snapshot.negative);
    if total == 0.0 {
        return (0, 0);
    }
    let pos = (f64::from(snapshot.positive) / total * 100.0).round() as u32;
    let neg = (f64::from(snapshot.negative) / total * 100.0).round() as u32;
    (pos, neg)
}

/// Arc lengths of the two donut segments on a track of [`TRACK_RADIUS`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DonutArcs {
    /// Full track length.
    pub circumference: f64,
    /// Length of the positive segment, starting at 12 o'clock.
    pub positive: f64,
    /// Length of the negative segment.
    pub negative: f64,
    /// Where the negative segment starts, measured along the track.
    pub negative_offset: f64,
}

impl DonutArcs {
    /// Positive share of the track as degrees.
    #[must_use]
    pub fn positive_degrees(&self) -> f64 {
        if self.circumference == 0.0 {
            0.0
        } else {
            self.positive / self.circumference * 360.0
        }
    }
}

/// What: Compute the arc geometry for `snapshot`.
///
/// Details:
/// - Shares are exact (unrounded); only displayed percentages are rounded.
/// - A zero total yields two empty arcs over the bare track.
#[must_use]
pub fn donut_arcs(snapshot: &SentimentSnapshot) -> DonutArcs {
    let circumference = 2.0 * std::f64::consts::PI * TRACK_RADIUS;
    let total = f64::from(snapshot.positive) + f64::from(snapshot.negative);
    let (pos_share, neg_share) = if total == 0.0 {
        (0.0, 0.0)
    } else {
        (
            f64::from(snapshot.positive) / total,
            f64::from(snapshot.negative) / total,
        )
    };
    let positive = pos_share * circumference;
    DonutArcs {
        circumference,
        positive,
        negative: neg_share * circumference,
        negative_offset: positive,
    }
}

/// What: Clamp a pointer cell into the viewport to freeze as the popup anchor.
#[must_use]
pub fn freeze_anchor(pointer: CellPos, viewport: Rect) -> CellPos {
    let max_x = (viewport.x + viewport.width).saturating_sub(1).max(viewport.x);
    let max_y = (viewport.y + viewport.height).saturating_sub(1).max(viewport.y);
    CellPos::new(
        pointer.x.clamp(viewport.x, max_x),
        pointer.y.clamp(viewport.y, max_y),
    )
}

/// What: Place the popup relative to its anchor.
///
/// Inputs:
/// - `anchor`: Frozen anchor cell.
/// - `viewport`: Whole terminal area.
///
/// Output:
/// - A [`POPUP_WIDTH`]×[`POPUP_HEIGHT`] rect (shrunk to fit tiny viewports).
///
/// Details:
/// - Anchors in the lower half render above the anchor, otherwise below.
/// - Horizontally centred on the anchor, then clamped to keep [`POPUP_MARGIN`] from
///   the left/right edges; vertically clamped against the top and bottom edges.
#[must_use]
pub fn popup_rect(anchor: CellPos, viewport: Rect) -> Rect {
    let width = POPUP_WIDTH.min(viewport.width);
    let height = POPUP_HEIGHT.min(viewport.height);
    let left = viewport.x + POPUP_MARGIN.min(viewport.width - width);
    let right = (viewport.x + viewport.width)
        .saturating_sub(width + POPUP_MARGIN)
        .max(left);
    let top = viewport.y + POPUP_MARGIN.min(viewport.height - height);
    let bottom = (viewport.y + viewport.height)
        .saturating_sub(height + POPUP_MARGIN)
        .max(top);

    let x = anchor.x.saturating_sub(width / 2).clamp(left, right);
    let mid = viewport.y + viewport.height / 2;
    let y = if anchor.y >= mid {
        anchor.y.saturating_sub(height + POPUP_MARGIN)
    } else {
        anchor.y + 1 + POPUP_MARGIN
    };
    Rect::new(x, y.clamp(top, bottom), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SentimentStatus;

    fn snap(positive: u32, negative: u32) -> SentimentSnapshot {
        SentimentSnapshot {
            positive,
            negative,
            status: SentimentStatus::Computed,
        }
    }

    #[test]
    /// What: Percentages follow the weights and an empty split shows 0/0.
    fn percentages_round_shares() {
        assert_eq!(percentages(&snap(0, 0)), (0, 0));
        assert_eq!(percentages(&snap(700, 300)), (70, 30));
        assert_eq!(percentages(&snap(1, 2)), (33, 67));
    }

    #[test]
    /// What: The negative arc starts where the positive one ends and both fill the track.
    fn arcs_split_the_track() {
        let arcs = donut_arcs(&snap(750, 250));
        assert!((arcs.positive + arcs.negative - arcs.circumference).abs() < 1e-9);
        assert!((arcs.negative_offset - arcs.positive).abs() < f64::EPSILON);
        assert!((arcs.positive_degrees() - 270.0).abs() < 1e-9);
        let empty = donut_arcs(&snap(0, 0));
        assert!(empty.positive == 0.0 && empty.negative == 0.0);
    }

    #[test]
    /// What: The popup flips above anchors in the lower half and stays inside the viewport.
    ///
    /// Inputs:
    /// - A 100×40 viewport with anchors near the top, the bottom and both side edges.
    ///
    /// Output:
    /// - Top anchors render below, bottom anchors above, edges clamp with a one-cell margin.
    fn popup_flips_and_clamps() {
        let vp = Rect::new(0, 0, 100, 40);
        let below = popup_rect(CellPos::new(50, 5), vp);
        assert_eq!((below.x, below.y), (36, 7));
        let above = popup_rect(CellPos::new(50, 30), vp);
        assert_eq!((above.x, above.y), (36, 17));
        let left = popup_rect(CellPos::new(0, 39), vp);
        assert_eq!((left.x, left.y), (1, 26));
        let right = popup_rect(CellPos::new(99, 0), vp);
        assert_eq!((right.x, right.y), (71, 2));
        assert_eq!(freeze_anchor(CellPos::new(500, 500), vp), CellPos::new(99, 39));
    }
}
