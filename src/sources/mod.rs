//! Remote data retrieval split into submodules, one per table family.
//!
//! Every function takes a `&dyn RecordStore` so the same code runs against the
//! hosted store and the in-memory demo/test store.

mod comments;
pub mod identity;
mod keywords;
mod likes;
mod sentiment;

pub use comments::{
    FEED_LIMIT, delete_comment, fetch_keyword_comments, fetch_recent_comments, insert_comment,
};
pub use identity::IdentityResolver;
pub use keywords::{fetch_categories, fetch_keywords};
pub use likes::{fetch_like_history, like_comment};
pub use sentiment::fetch_latest_sentiment;
