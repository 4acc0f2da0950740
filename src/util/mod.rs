//! Small helpers for URL encoding, JSON extraction, and terminal housekeeping.

use serde_json::Value;
use std::fmt::Write;

/// What: Report whether the process runs in headless test mode.
///
/// Output:
/// - `true` when `TRENDBOARD_TEST_HEADLESS=1`.
///
/// Details:
/// - Headless mode skips raw-mode terminal setup, the input thread and mouse capture.
#[must_use]
pub fn is_headless() -> bool {
    std::env::var("TRENDBOARD_TEST_HEADLESS").ok().as_deref() == Some("1")
}

/// What: Re-arm mouse capture after the terminal regains focus.
///
/// Details:
/// - Hover tracking needs motion events, which some terminals drop after focus changes.
/// - Skipped in headless mode so escape sequences stay out of test output.
pub fn ensure_mouse_capture() {
    if !is_headless() {
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);
    }
}

/// Bytes that pass through URL encoding untouched.
const fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// What: Encode text for a URL query component.
///
/// Output:
/// - Unreserved ASCII is copied; every other byte becomes `%XX` (space is `%20`).
///
/// Details:
/// - Works per UTF-8 byte, so a Hangul keyword expands to three escapes per syllable.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    input.bytes().fold(String::with_capacity(input.len()), |mut acc, b| {
        if is_unreserved(b) {
            acc.push(char::from(b));
        } else {
            let _ = write!(acc, "%{b:02X}");
        }
        acc
    })
}

/// What: Join `(key, value)` pairs into an encoded query string.
///
/// Output:
/// - `k1=v1&k2=v2` with both sides percent-encoded; empty input yields `""`.
#[must_use]
pub fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// What: First non-empty string field of `v` among `keys`, tried in order.
///
/// Details:
/// - Identity services disagree on the field name for the caller address.
#[must_use]
pub fn ss(v: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| v.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Percent-encoding keeps unreserved bytes and escapes PostgREST punctuation.
    ///
    /// Inputs:
    /// - A select expression with parentheses and commas, and a Hangul keyword.
    ///
    /// Output:
    /// - Reserved bytes become `%XX`; the Hangul syllable becomes three escaped bytes.
    fn percent_encode_escapes_reserved_and_multibyte() {
        assert_eq!(percent_encode("a(b,c)"), "a%28b%2Cc%29");
        assert_eq!(percent_encode("eq.true"), "eq.true");
        assert_eq!(percent_encode("가"), "%EA%B0%80");
        assert_eq!(percent_encode("a b"), "a%20b");
    }

    #[test]
    /// What: Query strings join encoded pairs with `&`.
    fn encode_query_joins_pairs() {
        let params = vec![
            ("select".to_string(), "*".to_string()),
            ("limit".to_string(), "5".to_string()),
        ];
        assert_eq!(encode_query(&params), "select=%2A&limit=5");
        assert_eq!(encode_query(&[]), "");
    }

    #[test]
    /// What: `ss` returns the first non-empty string among candidate keys.
    fn ss_prefers_first_present_key() {
        let v = serde_json::json!({"ip": "", "origin": "1.2.3.4", "IPv4": "5.6.7.8"});
        assert_eq!(ss(&v, &["ip", "origin", "IPv4"]).as_deref(), Some("1.2.3.4"));
        assert_eq!(ss(&v, &["missing"]), None);
    }
}
