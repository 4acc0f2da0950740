//! Modularized state module.
//!
//! Value types, the `AppState` container, worker messages and the interaction
//! transitions that mutate state in response to input.

pub mod app_state;
pub mod dispatch;
pub mod interaction;
pub mod modal;
pub mod types;

pub use app_state::AppState;
pub use dispatch::{
    ActionOutcome, ActionRequest, DetailOutcome, DetailRequest, Dispatch, DispatchReceivers,
    SentimentOutcome, SentimentRequest, SyncCommand, SyncEvent,
};
pub use modal::Modal;
pub use types::{
    ANONYMOUS_NICKNAME, Category, CategoryId, CellPos, Comment, CommentDetail, CommentId,
    Composer, Focus, HoverState, Keyword, KeywordId, LikeOutcome, MAX_COMMENT_CHARS,
    POPULAR_THRESHOLD, SENTIMENT_UNAVAILABLE, SentimentSnapshot, SentimentStatus,
    UNKNOWN_KEYWORD, like_key,
};
