//! Latest sentiment analysis per keyword.

use serde::Deserialize;

use crate::state::{KeywordId, SentimentSnapshot};
use crate::store::{Order, Query, RecordStore, Result, StoreError};

/// Row of the `sentiment_by_comments` table.
#[derive(Debug, Deserialize)]
struct SentimentRow {
    #[serde(default)]
    positive_rate: Option<f64>,
    #[serde(default)]
    negative_rate: Option<f64>,
}

/// What: Fetch the most recent sentiment analysis of `keyword`.
///
/// Output:
/// - `Ok(None)` when no analysis exists, `Ok(Some(_))` with a computed snapshot otherwise.
///
/// # Errors
/// - Propagates store and decode failures.
pub async fn fetch_latest_sentiment(
    store: &dyn RecordStore,
    keyword: KeywordId,
) -> Result<Option<SentimentSnapshot>> {
    let row = store
        .maybe_single(
            &Query::from("sentiment_by_comments")
                .select("positive_rate, negative_rate")
                .eq("keyword_id", keyword)
                .order("analyzed_at", Order::Desc)
                .limit(1),
        )
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    let row: SentimentRow = serde_json::from_value(row).map_err(|source| StoreError::Decode {
        table: "sentiment_by_comments".to_string(),
        source,
    })?;
    Ok(Some(SentimentSnapshot::computed(
        row.positive_rate.unwrap_or_default(),
        row.negative_rate.unwrap_or_default(),
    )))
}
