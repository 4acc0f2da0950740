//! Polar placement on the logical chart plane and its mapping to terminal cells.

use ratatui::layout::Rect;

use crate::state::CellPos;

/// Side length of the logical chart plane; the origin sits at its centre.
pub const CHART_PLANE: f64 = 520.0;
/// Inner end of a keyword's connector line.
pub const CONNECTOR_INNER_RADIUS: f64 = 48.0;
/// Outer end of a keyword's connector line.
pub const CONNECTOR_OUTER_RADIUS: f64 = 180.0;
/// Radius of the rank badge.
pub const BADGE_RADIUS: f64 = 170.0;
/// Radius of the label block.
pub const LABEL_RADIUS: f64 = 250.0;

/// What: Map an angle and radius to a Cartesian offset from the chart centre.
///
/// Inputs:
/// - `angle_deg`: Angle in degrees, 0° pointing up, growing clockwise.
/// - `radius`: Distance from the centre in logical units.
///
/// Output:
/// - `(x, y)` with `y` growing downward (screen convention).
///
/// Details:
/// - The angle is rotated by −90° before `x = cos·r`, `y = sin·r`.
#[must_use]
pub fn polar_offset(angle_deg: f64, radius: f64) -> (f64, f64) {
    let rad = (angle_deg - 90.0).to_radians();
    (rad.cos() * radius, rad.sin() * radius)
}

/// Linear mapping between the logical chart plane and a terminal rect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartViewport {
    /// Terminal area the chart is drawn into.
    pub area: Rect,
}

impl ChartViewport {
    /// Wrap `area`.
    #[must_use]
    pub const fn new(area: Rect) -> Self {
        Self { area }
    }

    /// What: Map a logical offset (origin at centre, y down) to the covering terminal cell.
    ///
    /// Output:
    /// - A cell inside `area`; offsets outside the plane clamp to the border.
    ///
    /// Details:
    /// - Uses the same stretch as a `Canvas` with bounds `[-260, 260]` on both axes, so
    ///   labels placed here line up with shapes drawn on the canvas.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn to_cell(&self, offset: (f64, f64)) -> CellPos {
        let half = CHART_PLANE / 2.0;
        let w = f64::from(self.area.width.max(1));
        let h = f64::from(self.area.height.max(1));
        let fx = ((offset.0 + half) / CHART_PLANE).clamp(0.0, 1.0);
        let fy = ((offset.1 + half) / CHART_PLANE).clamp(0.0, 1.0);
        let dx = ((fx * w) as u16).min(self.area.width.saturating_sub(1));
        let dy = ((fy * h) as u16).min(self.area.height.saturating_sub(1));
        CellPos::new(self.area.x + dx, self.area.y + dy)
    }

    /// What: Rect of `width`×1 cells centred on the cell for `offset`, kept inside `area`.
    #[must_use]
    pub fn label_rect(&self, offset: (f64, f64), width: u16) -> Rect {
        let cell = self.to_cell(offset);
        let width = width.min(self.area.width);
        let right_edge = self.area.x + self.area.width - width;
        let x = cell.x.saturating_sub(width / 2).clamp(self.area.x, right_edge);
        Rect::new(x, cell.y, width, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    /// What: 0° points up, 90° right, and a full turn is the identity.
    ///
    /// Inputs:
    /// - Several angles at radius 100, plus the same angles shifted by 360°.
    ///
    /// Output:
    /// - Expected cardinal offsets; distance from centre equals the radius.
    fn polar_offset_points_up_and_is_periodic() {
        assert!(close(polar_offset(0.0, 100.0), (0.0, -100.0)));
        assert!(close(polar_offset(90.0, 100.0), (100.0, 0.0)));
        assert!(close(polar_offset(180.0, 100.0), (0.0, 100.0)));
        for angle in [0.0, 30.0, 137.5, 270.0, 359.0] {
            for radius in [BADGE_RADIUS, LABEL_RADIUS] {
                let (x, y) = polar_offset(angle, radius);
                assert!(close((x, y), polar_offset(angle + 360.0, radius)));
                assert!((x.hypot(y) - radius).abs() < 1e-9);
            }
        }
    }

    #[test]
    /// What: The viewport maps the plane centre to the area centre and clamps outliers.
    fn viewport_maps_centre_and_clamps() {
        let vp = ChartViewport::new(Rect::new(10, 5, 52, 26));
        assert_eq!(vp.to_cell((0.0, 0.0)), CellPos::new(36, 18));
        assert_eq!(vp.to_cell((-1000.0, -1000.0)), CellPos::new(10, 5));
        assert_eq!(vp.to_cell((1000.0, 1000.0)), CellPos::new(61, 30));
        let r = vp.label_rect((260.0, 0.0), 8);
        assert_eq!(r, Rect::new(54, 18, 8, 1));
    }
}
