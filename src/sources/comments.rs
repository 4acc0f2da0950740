//! Comment feed reads and writes.

use serde::Deserialize;
use serde_json::json;

use crate::logic::parse_timestamp;
use crate::state::{
    ANONYMOUS_NICKNAME, Category, CategoryId, Comment, CommentDetail, CommentId, KeywordId,
    UNKNOWN_KEYWORD,
};
use crate::store::{Order, Query, RecordStore, Result, StoreError, decode_rows};

/// Number of comments loaded into the live feed.
pub const FEED_LIMIT: usize = 50;

/// Embedded `search_term_keyword` columns of a comment row.
#[derive(Debug, Default, Deserialize)]
struct KeywordJoin {
    #[serde(default)]
    keyword_name: Option<String>,
    #[serde(default)]
    category_id: Option<CategoryId>,
}

/// Row of the `comment` table.
#[derive(Debug, Deserialize)]
struct CommentRow {
    comment_id: CommentId,
    keyword_id: KeywordId,
    #[serde(default)]
    comment_contents: String,
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    comment_recommendation: Option<i64>,
    #[serde(default)]
    ip_address: Option<String>,
    #[serde(default)]
    search_term_keyword: Option<KeywordJoin>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        let join = row.search_term_keyword.unwrap_or_default();
        let mut comment = Self {
            id: row.comment_id,
            keyword_id: row.keyword_id,
            keyword_name: join
                .keyword_name
                .unwrap_or_else(|| UNKNOWN_KEYWORD.to_string()),
            category_name: Category::machine_name_for(join.category_id.unwrap_or_default())
                .to_string(),
            text: row.comment_contents,
            author: row
                .nickname
                .unwrap_or_else(|| ANONYMOUS_NICKNAME.to_string()),
            origin: row.ip_address.unwrap_or_default(),
            created_at: row
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or_default(),
            likes: 0,
            popular: false,
        };
        comment.set_likes(row.comment_recommendation.unwrap_or_default());
        comment
    }
}

/// Row of the per-keyword comment history.
#[derive(Debug, Deserialize)]
struct DetailRow {
    #[serde(default)]
    comment_contents: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    comment_recommendation: Option<i64>,
}

/// What: Fetch the newest comments across all keywords, with their keyword joined.
///
/// Output:
/// - Up to [`FEED_LIMIT`] comments, newest first, popular flag derived.
///
/// # Errors
/// - Propagates store and decode failures.
pub async fn fetch_recent_comments(store: &dyn RecordStore) -> Result<Vec<Comment>> {
    let rows = store
        .select(
            &Query::from("comment")
                .select(
                    "comment_id, keyword_id, comment_contents, nickname, created_at,
                     comment_recommendation, ip_address,
                     search_term_keyword(keyword_name, category_id)",
                )
                .order("created_at", Order::Desc)
                .limit(FEED_LIMIT),
        )
        .await?;
    let rows: Vec<CommentRow> = decode_rows("comment", rows)?;
    Ok(rows.into_iter().map(Comment::from).collect())
}

/// What: Fetch the full comment history of one keyword, oldest first.
///
/// # Errors
/// - Propagates store and decode failures.
pub async fn fetch_keyword_comments(
    store: &dyn RecordStore,
    keyword: KeywordId,
) -> Result<Vec<CommentDetail>> {
    let rows = store
        .select(
            &Query::from("comment")
                .select("comment_contents, created_at, comment_recommendation")
                .eq("keyword_id", keyword)
                .order("created_at", Order::Asc),
        )
        .await?;
    let rows: Vec<DetailRow> = decode_rows("comment", rows)?;
    Ok(rows
        .into_iter()
        .map(|row| CommentDetail {
            text: row.comment_contents,
            created_at: row
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or_default(),
            likes: row.comment_recommendation.unwrap_or_default(),
        })
        .collect())
}

/// What: Persist a new anonymous comment and return the confirmed record.
///
/// Inputs:
/// - `keyword`: Keyword the comment belongs to.
/// - `text`: Already trimmed, non-empty body.
/// - `origin`: Caller's origin identifier.
///
/// Output:
/// - The stored comment (id and timestamp assigned by the store). The keyword join is
///   not part of an insert response, so `keyword_name` is the unknown placeholder.
///
/// # Errors
/// - Store failures, or [`StoreError::EmptyInsert`] when the store returns no row.
pub async fn insert_comment(
    store: &dyn RecordStore,
    keyword: KeywordId,
    text: &str,
    origin: &str,
) -> Result<Comment> {
    let rows = store
        .insert(
            "comment",
            json!({
                "keyword_id": keyword,
                "comment_contents": text,
                "nickname": ANONYMOUS_NICKNAME,
                "ip_address": origin,
                "comment_recommendation": 0,
            }),
        )
        .await?;
    let row: CommentRow = decode_rows("comment", rows)?
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::EmptyInsert {
            table: "comment".to_string(),
        })?;
    Ok(row.into())
}

/// What: Delete the caller's own comment.
///
/// Output:
/// - `true` when a row was removed; `false` when nothing matched id and origin.
///
/// # Errors
/// - Propagates store failures.
pub async fn delete_comment(store: &dyn RecordStore, comment: CommentId, origin: &str) -> Result<bool> {
    let removed = store
        .delete(
            &Query::from("comment")
                .eq("comment_id", comment)
                .eq("ip_address", origin),
        )
        .await?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        let s = MemoryStore::new()
            .with_table("search_term_keyword", "keyword_id")
            .with_table("comment", "comment_id")
            .relate("comment", "keyword_id", "search_term_keyword", "keyword_id");
        s.seed(
            "search_term_keyword",
            vec![json!({"keyword_id": 1, "keyword_name": "월드컵", "category_id": 3})],
        );
        s.seed(
            "comment",
            vec![
                json!({"comment_id": 1, "keyword_id": 1, "comment_contents": "first", "ip_address": "1.2.3.4", "comment_recommendation": 7, "created_at": "2024-05-01T09:00:00+00:00"}),
                json!({"comment_id": 2, "keyword_id": 2, "comment_contents": "orphan", "ip_address": "5.6.7.8", "created_at": "2024-05-01T10:00:00+00:00"}),
            ],
        );
        s
    }

    #[tokio::test]
    /// What: Feed rows decode with joins, fallbacks and the popular flag.
    ///
    /// Inputs:
    /// - A comment joined to a naver keyword with 7 likes, and an orphan comment.
    ///
    /// Output:
    /// - Newest (orphan) first with the unknown-keyword label; the other is popular.
    async fn recent_comments_decode_joins() {
        let list = fetch_recent_comments(&store()).await.expect("comments");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].keyword_name, UNKNOWN_KEYWORD);
        assert_eq!(list[0].category_name, "google");
        assert_eq!(list[1].keyword_name, "월드컵");
        assert_eq!(list[1].category_name, "naver");
        assert!(list[1].popular);
        assert_eq!(list[1].author, ANONYMOUS_NICKNAME);
    }

    #[tokio::test]
    /// What: Inserted comments come back confirmed and appear in the keyword history.
    async fn insert_then_history() {
        let s = store();
        let c = insert_comment(&s, 1, "great trend!", "9.9.9.9").await.expect("insert");
        assert_eq!(c.id, 3);
        assert_eq!(c.likes, 0);
        let history = fetch_keyword_comments(&s, 1).await.expect("history");
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].text, "great trend!");
    }

    #[tokio::test]
    /// What: Deletes only match the caller's own comment.
    async fn delete_requires_matching_origin() {
        let s = store();
        assert!(!delete_comment(&s, 1, "5.6.7.8").await.expect("delete"));
        assert!(delete_comment(&s, 1, "1.2.3.4").await.expect("delete"));
        assert_eq!(s.rows("comment").len(), 1);
    }

    /// Store whose writes succeed without echoing rows back.
    struct SilentStore;

    #[async_trait::async_trait]
    impl RecordStore for SilentStore {
        async fn select(&self, _query: &Query) -> Result<Vec<serde_json::Value>> {
            Ok(Vec::new())
        }
        async fn insert(&self, _table: &str, _row: serde_json::Value) -> Result<Vec<serde_json::Value>> {
            Ok(Vec::new())
        }
        async fn update(&self, _query: &Query, _patch: serde_json::Value) -> Result<usize> {
            Ok(0)
        }
        async fn delete(&self, _query: &Query) -> Result<usize> {
            Ok(0)
        }
    }

    #[tokio::test]
    /// What: An insert that echoes nothing is reported as an empty insert, not a status.
    async fn insert_without_returned_row_is_empty_insert() {
        let err = insert_comment(&SilentStore, 1, "hi", "1.2.3.4")
            .await
            .expect_err("no row");
        assert!(matches!(err, StoreError::EmptyInsert { ref table } if table == "comment"));
    }
}
