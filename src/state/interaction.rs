//! Interaction transitions: selection, hover debounce, composer, likes, deletes, category.
//!
//! Every function mutates [`AppState`] synchronously and hands slow work to the
//! workers through [`Dispatch`]. Results come back through the runtime handlers.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::logic::freeze_anchor;
use crate::state::dispatch::{ActionRequest, DetailRequest, Dispatch, SentimentRequest, SyncCommand};
use crate::state::types::{
    CategoryId, CellPos, CommentId, Composer, HoverState, KeywordId, MAX_COMMENT_CHARS,
    SentimentSnapshot,
};
use crate::state::AppState;

/// Single-slot debounce timer with a generation counter.
///
/// Starting a new timer aborts the previous one; an expiry is honoured only when
/// it carries the current generation, so a late message from an aborted timer
/// is ignored.
#[derive(Debug, Default)]
pub struct HoverDebounce {
    generation: u64,
    handle: Option<AbortHandle>,
}

impl HoverDebounce {
    /// What: Abort any running timer and start a new one.
    ///
    /// Inputs:
    /// - `delay`: Time until expiry.
    /// - `tx`: Channel receiving the generation on expiry.
    ///
    /// Output:
    /// - Generation of the new timer.
    ///
    /// Details:
    /// - Must be called inside a tokio runtime.
    pub fn restart(&mut self, delay: Duration, tx: &mpsc::UnboundedSender<u64>) -> u64 {
        self.cancel();
        let generation = self.generation;
        let tx = tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(generation);
        });
        self.handle = Some(task.abort_handle());
        generation
    }

    /// Abort the running timer, if any, and invalidate its generation.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Consume an expiry; `true` only for the live timer's generation.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.handle.is_some() {
            self.handle = None;
            true
        } else {
            false
        }
    }

    /// Whether a timer is running.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

/// What: Toggle selection of keyword `id`.
///
/// Output:
/// - Returns `true` when `id` became selected (and its detail was requested).
///
/// Details:
/// - Clicking the selected keyword deselects it and closes the composer.
/// - Selecting another keyword clears the composer text.
pub fn click_keyword(app: &mut AppState, id: KeywordId, dispatch: &Dispatch) -> bool {
    if app.selected == Some(id) {
        close_composer(app);
        return false;
    }
    app.selected = Some(id);
    app.composer = Composer::default();
    app.details_loading.insert(id);
    let _ = dispatch.detail_tx.send(DetailRequest { keyword: id });
    tracing::debug!(keyword = id, "keyword selected");
    true
}

/// Deselect and close the composer.
pub fn close_composer(app: &mut AppState) {
    app.selected = None;
    app.composer = Composer::default();
}

/// What: Pointer entered or moved over keyword `id` at `pointer`.
///
/// Details:
/// - Ignored for keywords without a cached sentiment entry.
/// - A stable popup for the same keyword stays frozen.
/// - Otherwise the hover becomes pending and the debounce restarts.
pub fn hover_keyword(app: &mut AppState, id: KeywordId, pointer: CellPos, dispatch: &Dispatch) {
    if !app.sentiments.contains_key(&id) {
        return;
    }
    if matches!(app.hover, HoverState::Stable { keyword, .. } if keyword == id) {
        return;
    }
    app.hover = HoverState::Pending {
        keyword: id,
        pointer,
    };
    app.hover_debounce.restart(app.hover_delay, &dispatch.hover_tx);
}

/// Pointer left the hovered keyword: abort the pending timer and hide the popup.
pub fn leave_keyword(app: &mut AppState) {
    if app.hover != HoverState::Idle || app.hover_debounce.is_armed() {
        app.hover_debounce.cancel();
        app.hover = HoverState::Idle;
    }
}

/// What: Handle a debounce expiry.
///
/// Output:
/// - `true` when the hover became stable.
///
/// Details:
/// - Stale generations are ignored.
/// - The popup anchor is frozen from the last pointer cell.
/// - Placeholder and uncomputed snapshots trigger a sentiment fetch.
pub fn hover_timer_fired(app: &mut AppState, generation: u64, dispatch: &Dispatch) -> bool {
    if !app.hover_debounce.settle(generation) {
        return false;
    }
    let HoverState::Pending { keyword, pointer } = app.hover else {
        return false;
    };
    let anchor = freeze_anchor(pointer, app.viewport);
    app.hover = HoverState::Stable { keyword, anchor };
    if app
        .sentiments
        .get(&keyword)
        .is_none_or(SentimentSnapshot::needs_fetch)
    {
        let _ = dispatch.sentiment_tx.send(SentimentRequest {
            keyword,
            delay: None,
            only_if_present: false,
        });
    }
    true
}

/// Append `ch` to the composer text, up to the length limit.
pub fn composer_input(app: &mut AppState, ch: char) {
    if app.selected.is_none() || app.composer.submitting {
        return;
    }
    if app.composer.text.chars().count() < MAX_COMMENT_CHARS {
        app.composer.text.push(ch);
    }
}

/// Remove the last character of the composer text.
pub fn composer_backspace(app: &mut AppState) {
    if !app.composer.submitting {
        app.composer.text.pop();
    }
}

/// What: Submit the composer text for the selected keyword.
///
/// Output:
/// - `true` when a submission was dispatched.
///
/// Details:
/// - Requires a selected keyword, non-empty trimmed text and no submission in flight.
/// - The composer keeps its text until the store confirms.
pub fn submit_comment(app: &mut AppState, dispatch: &Dispatch) -> bool {
    let Some(keyword) = app.selected else {
        return false;
    };
    if app.composer.submitting {
        return false;
    }
    let text = app.composer.text.trim();
    if text.is_empty() {
        return false;
    }
    let request = ActionRequest::Submit {
        keyword,
        text: text.to_string(),
    };
    app.composer.submitting = true;
    let _ = dispatch.action_tx.send(request);
    true
}

/// What: Like `comment` unless this session already liked it or a like is in flight.
///
/// Output:
/// - `true` when a like was dispatched.
pub fn like_comment(app: &mut AppState, comment: CommentId, dispatch: &Dispatch) -> bool {
    if app.is_liked(comment) || !app.likes_in_flight.insert(comment) {
        return false;
    }
    let _ = dispatch.action_tx.send(ActionRequest::Like { comment });
    true
}

/// What: Delete the highlighted feed comment when it was written by this session.
///
/// Output:
/// - `true` when a delete was dispatched.
pub fn delete_selected_comment(app: &mut AppState, dispatch: &Dispatch) -> bool {
    let Some(comment) = app.selected_comment() else {
        return false;
    };
    if !app.is_own(comment) {
        tracing::debug!(comment = comment.id, "delete ignored: not own comment");
        return false;
    }
    let id = comment.id;
    if !app.deletes_in_flight.insert(id) {
        return false;
    }
    let _ = dispatch.action_tx.send(ActionRequest::Delete { comment: id });
    true
}

/// What: Switch to category `category`.
///
/// Output:
/// - `true` when the category changed.
///
/// Details:
/// - Clears the keyword list, selection, composer, hover and keyboard focus, then asks
///   the sync supervisor to restart the keyword schedule.
pub fn change_category(app: &mut AppState, category: CategoryId, dispatch: &Dispatch) -> bool {
    if category == app.category || !app.categories.iter().any(|c| c.id == category) {
        return false;
    }
    app.category = category;
    app.keywords.clear();
    app.keyword_rects.clear();
    app.keywords_loading = true;
    app.last_updated = None;
    app.keyword_focus = None;
    close_composer(app);
    leave_keyword(app);
    let _ = dispatch.sync_tx.send(SyncCommand::SetCategory(category));
    tracing::info!(category, "category changed");
    true
}

/// What: Move the keyboard focus over keywords by `delta` (wrapping) and hover it.
///
/// Details:
/// - The hover pointer is the centre of the focused label's rendered rect, or the
///   chart centre before the first frame.
pub fn focus_keyword(app: &mut AppState, delta: isize, dispatch: &Dispatch) {
    let count = app.keywords.len();
    if count == 0 {
        return;
    }
    let next = match app.keyword_focus {
        None if delta < 0 => count - 1,
        None => 0,
        Some(i) => {
            let len = isize::try_from(count).unwrap_or(isize::MAX);
            let cur = isize::try_from(i).unwrap_or(0);
            usize::try_from((cur + delta).rem_euclid(len)).unwrap_or(0)
        }
    };
    app.keyword_focus = Some(next);
    let id = app.keywords[next].id;
    let pointer = app
        .keyword_rects
        .iter()
        .find(|(k, _)| *k == id)
        .map(|(_, r)| CellPos::new(r.x + r.width / 2, r.y))
        .or_else(|| {
            app.chart_rect
                .map(|r| CellPos::new(r.x + r.width / 2, r.y + r.height / 2))
        })
        .unwrap_or_default();
    leave_keyword(app);
    hover_keyword(app, id, pointer, dispatch);
}

/// Click the keyword under the keyboard focus.
pub fn activate_focused_keyword(app: &mut AppState, dispatch: &Dispatch) -> bool {
    let Some(id) = app.keyword_focus.and_then(|i| app.keywords.get(i)).map(|k| k.id) else {
        return false;
    };
    click_keyword(app, id, dispatch)
}

/// Move the feed highlight by `delta`, clamped to the list.
pub fn move_feed_selection(app: &mut AppState, delta: isize) {
    let last = app.comments.len().saturating_sub(1);
    app.feed_selected = app.feed_selected.saturating_add_signed(delta).min(last);
}
