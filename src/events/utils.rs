use ratatui::layout::Rect;

/// Whether cell `(x, y)` lies inside `rect`.
pub const fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

/// First id whose recorded rect contains `(x, y)`.
pub fn hit<K: Copy>(rects: &[(K, Rect)], x: u16, y: u16) -> Option<K> {
    rects
        .iter()
        .find(|(_, r)| contains(*r, x, y))
        .map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Rect edges are half-open.
    fn hit_testing_is_half_open() {
        let rects = [(7_i64, Rect::new(2, 3, 4, 1))];
        assert_eq!(hit(&rects, 2, 3), Some(7));
        assert_eq!(hit(&rects, 5, 3), Some(7));
        assert_eq!(hit(&rects, 6, 3), None);
        assert_eq!(hit(&rects, 3, 4), None);
    }
}
