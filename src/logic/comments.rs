//! Feed ordering and display helpers for comments.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::state::Comment;

/// Number of popular comments pinned to the top of the feed.
pub const PINNED_POPULAR: usize = 3;

/// What: Order the live feed.
///
/// Inputs:
/// - `comments`: Feed items in any order.
///
/// Output:
/// - Up to [`PINNED_POPULAR`] popular comments by like count (descending), followed by
///   every other comment newest first.
///
/// Details:
/// - Popular comments beyond the pinned ones fall back into the time-ordered segment,
///   so the output is a permutation of the input.
/// - Both sorts are stable: ties keep their input order.
#[must_use]
pub fn order_feed(comments: Vec<Comment>) -> Vec<Comment> {
    let (mut popular, mut regular): (Vec<_>, Vec<_>) =
        comments.into_iter().partition(|c| c.popular);
    popular.sort_by(|a, b| b.likes.cmp(&a.likes));
    if popular.len() > PINNED_POPULAR {
        regular.extend(popular.split_off(PINNED_POPULAR));
    }
    regular.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    popular.extend(regular);
    popular
}

/// What: Mask an origin identifier for display.
///
/// Output:
/// - Dotted quads keep their first two parts: `a.b.*.***`.
/// - Empty and synthetic (`user_…`) identifiers show their first 12 characters then `...`.
/// - Anything else is returned unchanged.
#[must_use]
pub fn mask_origin(origin: &str) -> String {
    if origin.is_empty() || origin.starts_with("user_") {
        let head: String = origin.chars().take(12).collect();
        return format!("{head}...");
    }
    let parts: Vec<&str> = origin.split('.').collect();
    if let [a, b, _, _] = parts.as_slice() {
        return format!("{a}.{b}.*.***");
    }
    origin.to_string()
}

/// Format `ts` as `YY-MM-DD HH:mm` in local time.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    format_timestamp_in(ts, &Local)
}

/// Format `ts` as `YY-MM-DD HH:mm` in the time zone `tz`.
#[must_use]
pub fn format_timestamp_in<Tz: TimeZone>(ts: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.with_timezone(tz).format("%y-%m-%d %H:%M").to_string()
}

/// What: Parse a store timestamp.
///
/// Details:
/// - Accepts RFC 3339 and offset-less `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
