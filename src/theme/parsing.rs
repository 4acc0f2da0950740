use ratatui::style::Color;

/// What: Split a `key = value` line into a normalised key and a comment-free value.
///
/// Output:
/// - `None` for blank lines, comment lines and lines without `=`.
/// - `Some((key, value))` with the key lowercased and `.`/`-`/space mapped to `_`.
pub(crate) fn split_key_value(line: &str) -> Option<(String, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let (raw_key, raw_val) = trimmed.split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    Some((key, strip_inline_comment(raw_val)))
}

/// What: Strip a trailing inline comment from a config value.
///
/// Output:
/// - Comment-free and trimmed substring of the input.
///
/// Details:
/// - A comment starts at a `#` preceded by whitespace, so `#RRGGBB` colours and URL
///   fragments survive.
/// - Leading whitespace is dropped first; a `#` opening the value is part of it.
pub(crate) fn strip_inline_comment(s: &str) -> &str {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let cut = (1..bytes.len()).find(|&i| bytes[i] == b'#' && bytes[i - 1].is_ascii_whitespace());
    cut.map_or(s, |i| &s[..i]).trim()
}

/// Lenient boolean: `true`, `1`, `yes`, `on` (case-insensitive).
pub(crate) fn parse_bool(val: &str) -> bool {
    let lv = val.to_ascii_lowercase();
    lv == "true" || lv == "1" || lv == "yes" || lv == "on"
}

/// What: Parse a colour as `#RRGGBB`, `RRGGBB` or `R,G,B`.
///
/// Output:
/// - `Some(Color::Rgb)` on success; `None` for anything else.
pub(crate) fn parse_color_value(s: &str) -> Option<Color> {
    let t = strip_inline_comment(s);
    if t.is_empty() {
        return None;
    }
    let h = t.strip_prefix('#').unwrap_or(t);
    if h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&h[0..2], 16).ok()?;
        let g = u8::from_str_radix(&h[2..4], 16).ok()?;
        let b = u8::from_str_radix(&h[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    let parts: Vec<&str> = t.split(',').map(str::trim).collect();
    if let [r, g, b] = parts.as_slice() {
        return Some(Color::Rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Inline comments need leading whitespace; URLs and hex colours are untouched.
    ///
    /// Inputs:
    /// - A URL value, a hex colour with a trailing comment, and a bare comment line.
    ///
    /// Output:
    /// - URL kept whole, colour parsed, comment line skipped.
    fn key_values_keep_urls_and_colors() {
        assert_eq!(
            split_key_value("store-url = https://x.supabase.co/#frag"),
            Some(("store_url".to_string(), "https://x.supabase.co/#frag"))
        );
        assert_eq!(
            split_key_value("Text.Primary = #cdd6f4   # main text"),
            Some(("text_primary".to_string(), "#cdd6f4"))
        );
        assert_eq!(split_key_value("# store_url = x"), None);
        assert_eq!(split_key_value("no equals sign"), None);
        assert_eq!(parse_color_value("#cdd6f4"), Some(Color::Rgb(205, 214, 244)));
        assert_eq!(parse_color_value("205, 214, 244"), Some(Color::Rgb(205, 214, 244)));
        assert_eq!(parse_color_value("blue"), None);
        assert!(parse_bool("YES") && parse_bool("on") && !parse_bool("off"));
    }

    #[test]
    /// What: A hex colour right after `=` is the value, not a comment.
    fn leading_hash_value_survives_space_after_equals() {
        assert_eq!(strip_inline_comment(" #ff0000"), "#ff0000");
        assert_eq!(strip_inline_comment("  #ff0000 # red"), "#ff0000");
        assert_eq!(
            split_key_value("accent = #ff0000"),
            Some(("accent".to_string(), "#ff0000"))
        );
        assert_eq!(parse_color_value(" #ff0000"), Some(Color::Rgb(255, 0, 0)));
    }
}
