//! Messages exchanged between the event loop and background workers.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::state::{
    Category, CategoryId, Comment, CommentDetail, CommentId, Keyword, KeywordId, LikeOutcome,
    SentimentSnapshot,
};

/// Commands for the sync supervisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncCommand {
    /// Switch the keyword poll to another category (immediate fetch).
    SetCategory(CategoryId),
    /// Fetch the comment feed now, outside the regular schedule.
    RefreshComments,
    /// Abort every poll task and stop.
    Shutdown,
}

/// Results produced by the sync supervisor's tasks.
#[derive(Debug)]
pub enum SyncEvent {
    /// Keyword list for `category`.
    Keywords {
        /// Category the list was fetched for.
        category: CategoryId,
        /// Ranked keywords or an error message.
        result: Result<Vec<Keyword>, String>,
    },
    /// Newest comments across all keywords.
    Comments(Result<Vec<Comment>, String>),
    /// Comment ids previously liked by `origin`.
    LikeHistory {
        /// Resolved session origin.
        origin: String,
        /// Liked comment ids.
        comments: Vec<CommentId>,
    },
    /// Category table.
    Categories(Result<Vec<Category>, String>),
}

/// Request for a keyword's comment history and latest sentiment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetailRequest {
    /// Keyword to load.
    pub keyword: KeywordId,
}

/// Result of a [`DetailRequest`].
#[derive(Debug)]
pub struct DetailOutcome {
    /// Requested keyword.
    pub keyword: KeywordId,
    /// Comment history, oldest first.
    pub comments: Result<Vec<CommentDetail>, String>,
    /// Latest sentiment, `Ok(None)` when no analysis exists.
    pub sentiment: Result<Option<SentimentSnapshot>, String>,
}

/// Request for a keyword's latest sentiment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SentimentRequest {
    /// Keyword to load.
    pub keyword: KeywordId,
    /// Wait this long before fetching.
    pub delay: Option<Duration>,
    /// Ignore an absent record instead of caching it as uncomputed.
    pub only_if_present: bool,
}

/// Result of a [`SentimentRequest`].
#[derive(Debug)]
pub struct SentimentOutcome {
    /// Requested keyword.
    pub keyword: KeywordId,
    /// Latest sentiment, `Ok(None)` when no analysis exists.
    pub result: Result<Option<SentimentSnapshot>, String>,
    /// Copied from the request.
    pub only_if_present: bool,
}

/// User actions that write to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionRequest {
    /// Persist a new comment.
    Submit {
        /// Keyword the composer is bound to.
        keyword: KeywordId,
        /// Trimmed comment text.
        text: String,
    },
    /// Like a comment.
    Like {
        /// Comment to like.
        comment: CommentId,
    },
    /// Delete the caller's own comment.
    Delete {
        /// Comment to delete.
        comment: CommentId,
    },
}

/// Results of [`ActionRequest`]s.
#[derive(Debug)]
pub enum ActionOutcome {
    /// A submission finished.
    Submitted {
        /// Keyword the comment was posted to.
        keyword: KeywordId,
        /// Confirmed comment or an error message.
        result: Result<Comment, String>,
    },
    /// A like finished.
    Liked {
        /// Liked comment.
        comment: CommentId,
        /// Origin the like was recorded for.
        origin: String,
        /// Outcome or an error message.
        result: Result<LikeOutcome, String>,
    },
    /// A delete finished.
    Deleted {
        /// Deleted comment.
        comment: CommentId,
        /// `Ok(true)` when removed, `Ok(false)` when nothing matched.
        result: Result<bool, String>,
    },
}

/// Senders the interaction layer uses to reach the workers.
#[derive(Clone, Debug)]
pub struct Dispatch {
    /// Sync supervisor commands.
    pub sync_tx: mpsc::UnboundedSender<SyncCommand>,
    /// Keyword detail requests.
    pub detail_tx: mpsc::UnboundedSender<DetailRequest>,
    /// Sentiment requests.
    pub sentiment_tx: mpsc::UnboundedSender<SentimentRequest>,
    /// Store writes.
    pub action_tx: mpsc::UnboundedSender<ActionRequest>,
    /// Hover debounce expiries, carrying the timer generation.
    pub hover_tx: mpsc::UnboundedSender<u64>,
}

/// Receiving ends matching a [`Dispatch`].
#[derive(Debug)]
pub struct DispatchReceivers {
    /// Sync supervisor commands.
    pub sync_rx: mpsc::UnboundedReceiver<SyncCommand>,
    /// Keyword detail requests.
    pub detail_rx: mpsc::UnboundedReceiver<DetailRequest>,
    /// Sentiment requests.
    pub sentiment_rx: mpsc::UnboundedReceiver<SentimentRequest>,
    /// Store writes.
    pub action_rx: mpsc::UnboundedReceiver<ActionRequest>,
    /// Hover debounce expiries.
    pub hover_rx: mpsc::UnboundedReceiver<u64>,
}

impl Dispatch {
    /// Create a connected sender/receiver set.
    #[must_use]
    pub fn channel() -> (Self, DispatchReceivers) {
        let (sync_tx, sync_rx) = mpsc::unbounded_channel();
        let (detail_tx, detail_rx) = mpsc::unbounded_channel();
        let (sentiment_tx, sentiment_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (hover_tx, hover_rx) = mpsc::unbounded_channel();
        (
            Self {
                sync_tx,
                detail_tx,
                sentiment_tx,
                action_tx,
                hover_tx,
            },
            DispatchReceivers {
                sync_rx,
                detail_rx,
                sentiment_rx,
                action_rx,
                hover_rx,
            },
        )
    }
}
