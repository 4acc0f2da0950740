//! Like history and the like/increment sequence.

use serde::Deserialize;
use serde_json::json;

use crate::state::{CommentId, LikeOutcome};
use crate::store::{Query, RecordStore, Result, decode_rows};

/// Row of the `comment_recommendation` table.
#[derive(Debug, Deserialize)]
struct LikeRow {
    comment_id: CommentId,
}

/// What: Comment ids already liked by `origin`.
///
/// # Errors
/// - Propagates store and decode failures.
pub async fn fetch_like_history(store: &dyn RecordStore, origin: &str) -> Result<Vec<CommentId>> {
    let rows = store
        .select(
            &Query::from("comment_recommendation")
                .select("comment_id")
                .eq("ip_address", origin),
        )
        .await?;
    let rows: Vec<LikeRow> = decode_rows("comment_recommendation", rows)?;
    Ok(rows.into_iter().map(|r| r.comment_id).collect())
}

/// What: Like `comment` on behalf of `origin` and bump its counter.
///
/// Output:
/// - [`LikeOutcome::AlreadyLiked`] when a like record for the pair exists.
/// - [`LikeOutcome::Missing`] when the comment is gone.
/// - [`LikeOutcome::Liked`] with the new count otherwise.
///
/// # Errors
/// - Propagates store failures from any step.
///
/// Details:
/// - Four separate calls: existence check, count read, like insert, count write-back.
///   Two clients liking concurrently can lose an increment.
pub async fn like_comment(
    store: &dyn RecordStore,
    comment: CommentId,
    origin: &str,
) -> Result<LikeOutcome> {
    let existing = store
        .maybe_single(
            &Query::from("comment_recommendation")
                .select("comment_id, ip_address")
                .eq("comment_id", comment)
                .eq("ip_address", origin),
        )
        .await?;
    if existing.is_some() {
        return Ok(LikeOutcome::AlreadyLiked);
    }

    let target = store
        .maybe_single(
            &Query::from("comment")
                .select("comment_recommendation")
                .eq("comment_id", comment),
        )
        .await?;
    let Some(target) = target else {
        return Ok(LikeOutcome::Missing);
    };
    let current = target
        .get("comment_recommendation")
        .and_then(serde_json::Value::as_i64)
        .unwrap_or_default();

    store
        .insert(
            "comment_recommendation",
            json!({"comment_id": comment, "ip_address": origin}),
        )
        .await?;
    let likes = current + 1;
    store
        .update(
            &Query::from("comment").eq("comment_id", comment),
            json!({"comment_recommendation": likes}),
        )
        .await?;
    tracing::debug!(comment, likes, "like stored");
    Ok(LikeOutcome::Liked { likes })
}
