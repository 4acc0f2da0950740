//! Fold worker results into `AppState`.
//!
//! These are the only places besides the interaction transitions that mutate the
//! state, and they run on the event loop.

use chrono::Local;

use crate::logic::{latest_update, seed_sentiments};
use crate::state::interaction::{close_composer, leave_keyword};
use crate::state::{
    ActionOutcome, AppState, Category, CommentDetail, CommentId, DetailOutcome, Dispatch,
    LikeOutcome, Modal, SENTIMENT_UNAVAILABLE, SentimentOutcome, SentimentRequest,
    SentimentSnapshot, SyncEvent, UNKNOWN_KEYWORD, like_key,
};

/// What: Apply a sync supervisor result.
///
/// Details:
/// - Keyword lists for a category other than the active one are discarded.
/// - New keyword ids get a placeholder sentiment; known ids keep their cache.
/// - Failed fetches keep the previous state (the next poll retries).
pub fn apply_sync_event(app: &mut AppState, event: SyncEvent) {
    match event {
        SyncEvent::Keywords { category, result } => {
            if category != app.category {
                tracing::debug!(category, active = app.category, "discarding stale keyword list");
                return;
            }
            app.keywords_loading = false;
            let Ok(list) = result else {
                return;
            };
            seed_sentiments(&mut app.sentiments, &list);
            app.last_updated = latest_update(&list);
            app.keywords = list;
            if let Some(hovered) = app.hover.keyword()
                && app.keyword(hovered).is_none()
            {
                leave_keyword(app);
            }
            app.keyword_focus = app
                .keyword_focus
                .filter(|_| !app.keywords.is_empty())
                .map(|i| i.min(app.keywords.len() - 1));
        }
        SyncEvent::Comments(result) => {
            app.comments_loading = false;
            if let Ok(list) = result {
                app.comments = list;
                app.reorder_feed();
            }
        }
        SyncEvent::LikeHistory { origin, comments } => {
            for id in comments {
                app.likes.insert(like_key(&origin, id));
            }
            app.origin = Some(origin);
        }
        SyncEvent::Categories(result) => {
            if let Ok(list) = result
                && !list.is_empty()
            {
                app.categories = list;
            }
        }
    }
}

/// What: Apply a keyword detail result.
///
/// Details:
/// - A missing or failed sentiment is cached as uncomputed so the popup shows why.
/// - A failed comment history keeps what was loaded before.
pub fn apply_detail_outcome(app: &mut AppState, outcome: DetailOutcome) {
    let keyword = outcome.keyword;
    app.details_loading.remove(&keyword);
    if let Ok(list) = outcome.comments {
        app.details.insert(keyword, list);
    }
    let snapshot = match outcome.sentiment {
        Ok(Some(s)) => s,
        Ok(None) | Err(_) => SentimentSnapshot::uncomputed(SENTIMENT_UNAVAILABLE),
    };
    app.sentiments.insert(keyword, snapshot);
}

/// What: Apply a sentiment fetch result.
///
/// Details:
/// - With `only_if_present`, an absent or failed record leaves the cache untouched.
pub fn apply_sentiment_outcome(app: &mut AppState, outcome: SentimentOutcome) {
    match outcome.result {
        Ok(Some(s)) => {
            app.sentiments.insert(outcome.keyword, s);
        }
        Ok(None) | Err(_) if !outcome.only_if_present => {
            app.sentiments.insert(
                outcome.keyword,
                SentimentSnapshot::uncomputed(SENTIMENT_UNAVAILABLE),
            );
        }
        Ok(None) | Err(_) => {}
    }
}

/// What: Apply the result of a store write.
///
/// Inputs:
/// - `app`: Application state.
/// - `outcome`: Worker result.
/// - `dispatch`: Used to schedule the post-submit sentiment refresh.
///
/// Details:
/// - Submissions are reflected only after the store confirms them: the comment is
///   prepended to the feed and appended to the keyword's history, and the composer
///   closes when still bound to that keyword. On failure the composer keeps its text.
/// - A successful like records the key locally and updates the feed count.
/// - Failures raise an alert.
pub fn apply_action_outcome(app: &mut AppState, outcome: ActionOutcome, dispatch: &Dispatch) {
    match outcome {
        ActionOutcome::Submitted { keyword, result } => match result {
            Ok(mut comment) => {
                if let Some(k) = app.keyword(keyword) {
                    comment.keyword_name.clone_from(&k.text);
                    comment.category_name = Category::machine_name_for(k.category_id).to_string();
                } else if comment.keyword_name.is_empty() {
                    comment.keyword_name = UNKNOWN_KEYWORD.to_string();
                }
                app.details.entry(keyword).or_default().push(CommentDetail {
                    text: comment.text.clone(),
                    created_at: comment.created_at,
                    likes: comment.likes,
                });
                if !app.comments.iter().any(|c| c.id == comment.id) {
                    app.comments.insert(0, comment);
                    app.reorder_feed();
                }
                // A composer reopened after the submit started is not the one that sent it.
                if app.selected == Some(keyword) && app.composer.submitting {
                    close_composer(app);
                }
                let _ = dispatch.sentiment_tx.send(SentimentRequest {
                    keyword,
                    delay: Some(app.sentiment_refresh_delay),
                    only_if_present: true,
                });
            }
            Err(msg) => {
                if app.selected == Some(keyword) && app.composer.submitting {
                    app.composer.submitting = false;
                }
                app.modal = Modal::Alert {
                    message: format!("Failed to post comment: {msg}"),
                };
            }
        },
        ActionOutcome::Liked {
            comment,
            origin,
            result,
        } => {
            app.likes_in_flight.remove(&comment);
            match result {
                Ok(LikeOutcome::Liked { likes }) => {
                    app.likes.insert(like_key(&origin, comment));
                    if let Some(c) = app.comments.iter_mut().find(|c| c.id == comment) {
                        c.set_likes(likes);
                    }
                    app.reorder_feed();
                }
                Ok(LikeOutcome::AlreadyLiked) => {
                    app.likes.insert(like_key(&origin, comment));
                }
                Ok(LikeOutcome::Missing) => {
                    tracing::debug!(comment, "liked comment no longer exists");
                }
                Err(msg) => {
                    app.modal = Modal::Alert {
                        message: format!("Failed to like comment: {msg}"),
                    };
                }
            }
            app.origin.get_or_insert(origin);
        }
        ActionOutcome::Deleted { comment, result } => {
            app.deletes_in_flight.remove(&comment);
            match result {
                Ok(true) => remove_comment(app, comment),
                Ok(false) => {
                    app.modal = Modal::Alert {
                        message: "Comment could not be deleted.".to_string(),
                    };
                }
                Err(msg) => {
                    app.modal = Modal::Alert {
                        message: format!("Failed to delete comment: {msg}"),
                    };
                }
            }
        }
    }
}

/// Drop a deleted comment from the feed and from its keyword's history.
fn remove_comment(app: &mut AppState, comment: CommentId) {
    let Some(pos) = app.comments.iter().position(|c| c.id == comment) else {
        return;
    };
    let removed = app.comments.remove(pos);
    if let Some(history) = app.details.get_mut(&removed.keyword_id)
        && let Some(i) = history
            .iter()
            .position(|d| d.text == removed.text && d.created_at == removed.created_at)
    {
        history.remove(i);
    }
    app.reorder_feed();
}

/// Advance the header clock.
pub fn handle_tick(app: &mut AppState) {
    app.now = Local::now();
}
