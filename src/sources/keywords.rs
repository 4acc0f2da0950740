//! Category and trending keyword reads.

use serde::Deserialize;

use crate::logic::{assign_angles, keywords::KEYWORD_SLOTS, parse_timestamp};
use crate::state::{Category, CategoryId, Keyword};
use crate::store::{Order, Query, RecordStore, Result, decode_rows};

/// Row of the `category` table.
#[derive(Debug, Deserialize)]
struct CategoryRow {
    category_id: CategoryId,
    #[serde(default)]
    category_name: Option<String>,
}

/// Row of the `search_term_keyword` table.
#[derive(Debug, Deserialize)]
struct KeywordRow {
    keyword_id: i64,
    keyword_name: String,
    #[serde(default)]
    rank: Option<i64>,
    category_id: CategoryId,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<KeywordRow> for Keyword {
    fn from(row: KeywordRow) -> Self {
        Self {
            id: row.keyword_id,
            text: row.keyword_name,
            rank: row
                .rank
                .and_then(|r| u32::try_from(r).ok())
                .unwrap_or_default(),
            angle: 0.0,
            category_id: row.category_id,
            created_at: row
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or_default(),
        }
    }
}

/// What: Load the category table.
///
/// Output:
/// - Categories ordered by id. Built-in display names are used for known machine names;
///   otherwise the stored name is shown as is.
///
/// # Errors
/// - Propagates store failures; the caller keeps the built-in table.
pub async fn fetch_categories(store: &dyn RecordStore) -> Result<Vec<Category>> {
    let rows = store
        .select(
            &Query::from("category")
                .select("category_id, category_name")
                .order("category_id", Order::Asc),
        )
        .await?;
    let rows: Vec<CategoryRow> = decode_rows("category", rows)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let name = row
                .category_name
                .unwrap_or_else(|| Category::machine_name_for(row.category_id).to_string());
            let display = Category::display_for(&name).map_or_else(|| name.clone(), str::to_string);
            Category {
                id: row.category_id,
                name,
                display,
            }
        })
        .collect())
}

/// What: Fetch the active keywords of `category`, ranked.
///
/// Output:
/// - At most twelve keywords by rank ascending, angles assigned from list position.
///
/// # Errors
/// - Propagates store and decode failures.
pub async fn fetch_keywords(store: &dyn RecordStore, category: CategoryId) -> Result<Vec<Keyword>> {
    let rows = store
        .select(
            &Query::from("search_term_keyword")
                .select("keyword_id, keyword_name, rank, category_id, created_at")
                .eq("is_active", true)
                .eq("category_id", category)
                .order("rank", Order::Asc)
                .limit(KEYWORD_SLOTS),
        )
        .await?;
    let rows: Vec<KeywordRow> = decode_rows("search_term_keyword", rows)?;
    let mut keywords: Vec<Keyword> = rows.into_iter().map(Keyword::from).collect();
    assign_angles(&mut keywords);
    Ok(keywords)
}
