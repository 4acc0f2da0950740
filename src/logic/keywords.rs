//! Keyword list refresh: chart angles, sentiment cache seeding, last-updated time.

use std::collections::HashMap;

use chrono::{DateTime, Local, Utc};

use crate::state::{Keyword, KeywordId, SentimentSnapshot};

/// Keywords fetched per refresh; also the minimum number of chart slots.
pub const KEYWORD_SLOTS: usize = 12;

/// What: Chart angle of the keyword at `index` in a list of `count`.
///
/// Output:
/// - `(index / max(count, 12)) * 360` degrees.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn keyword_angle(index: usize, count: usize) -> f64 {
    index as f64 / count.max(KEYWORD_SLOTS) as f64 * 360.0
}

/// Recompute every keyword's angle from its list position.
pub fn assign_angles(keywords: &mut [Keyword]) {
    let count = keywords.len();
    for (i, k) in keywords.iter_mut().enumerate() {
        k.angle = keyword_angle(i, count);
    }
}

/// What: Give newly seen keywords a placeholder sentiment.
///
/// Details:
/// - Ids already cached keep their snapshot; nothing is evicted.
pub fn seed_sentiments(cache: &mut HashMap<KeywordId, SentimentSnapshot>, keywords: &[Keyword]) {
    for k in keywords {
        cache
            .entry(k.id)
            .or_insert_with(SentimentSnapshot::placeholder);
    }
}

/// Most recent creation time among `keywords`.
#[must_use]
pub fn latest_update(keywords: &[Keyword]) -> Option<DateTime<Utc>> {
    keywords.iter().map(|k| k.created_at).max()
}

/// Format a "last updated" instant as local `HH:mm:ss`.
#[must_use]
pub fn format_last_updated(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M:%S").to_string()
}
