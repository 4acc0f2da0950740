//! Shared layout and text helpers for the dashboard widgets.

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `s` in cells, saturating at `u16::MAX`.
#[must_use]
pub fn cell_width(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}

/// What: Cut `s` to at most `max` display cells, ending in `…` when shortened.
///
/// Details:
/// - Wide characters (Hangul, CJK) count as two cells.
#[must_use]
pub fn truncate_to_width(s: &str, max: u16) -> String {
    let max = usize::from(max);
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Rect of `width`×`height` centred in `area`, shrunk to fit.
#[must_use]
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Truncation counts wide characters as two cells.
    fn truncate_respects_display_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("트렌드보드", 5), "트렌…");
        assert_eq!(cell_width("트렌드"), 6);
        assert_eq!(
            centered_rect(Rect::new(0, 0, 20, 10), 10, 4),
            Rect::new(5, 3, 10, 4)
        );
    }
}
