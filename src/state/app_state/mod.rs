//! Central `AppState` container owned by the event loop.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use ratatui::layout::Rect;

use crate::logic::order_feed;
use crate::state::interaction::HoverDebounce;
use crate::state::modal::Modal;
use crate::state::types::{
    Category, CategoryId, Comment, CommentDetail, CommentId, Composer, Focus, HoverState, Keyword,
    KeywordId, SentimentSnapshot, like_key,
};

/// Default hover debounce before the sentiment popup appears.
pub const DEFAULT_HOVER_DEBOUNCE: Duration = Duration::from_millis(200);
/// Default delay before re-fetching sentiment after a submission.
pub const DEFAULT_SENTIMENT_REFRESH_DELAY: Duration = Duration::from_millis(2000);

/// Global application state mutated by the event loop.
///
/// Background workers never touch this struct; their results arrive over
/// channels and are folded in by the runtime handlers.
#[derive(Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppState {
    /// Categories shown in the sidebar.
    pub categories: Vec<Category>,
    /// Active category.
    pub category: CategoryId,
    /// Ranked keywords of the active category.
    pub keywords: Vec<Keyword>,
    /// Most recent keyword creation time, shown as "last updated".
    pub last_updated: Option<DateTime<Utc>>,
    /// Keyword list is loading for the first time in this category.
    pub keywords_loading: bool,
    /// Sentiment cache keyed by keyword id.
    pub sentiments: HashMap<KeywordId, SentimentSnapshot>,
    /// Comment history per keyword, oldest first.
    pub details: HashMap<KeywordId, Vec<CommentDetail>>,
    /// Keywords whose detail fetch is in flight.
    pub details_loading: HashSet<KeywordId>,
    /// Live feed, kept in display order.
    pub comments: Vec<Comment>,
    /// Feed has not been loaded yet.
    pub comments_loading: bool,
    /// Index into `comments` highlighted in the feed.
    pub feed_selected: usize,
    /// Keyword the composer is bound to.
    pub selected: Option<KeywordId>,
    /// Composer text and submission flag.
    pub composer: Composer,
    /// Chart hover sub-machine.
    pub hover: HoverState,
    /// Single-slot hover timer.
    pub hover_debounce: HoverDebounce,
    /// Keyboard focus over keywords (index into `keywords`).
    pub keyword_focus: Option<usize>,
    /// Local like set keyed `"<origin>-<comment_id>"`.
    pub likes: HashSet<String>,
    /// Comments with a like request in flight.
    pub likes_in_flight: HashSet<CommentId>,
    /// Comments with a delete request in flight.
    pub deletes_in_flight: HashSet<CommentId>,
    /// Session origin, once resolved.
    pub origin: Option<String>,
    /// Pane receiving navigation keys.
    pub focus: Focus,
    /// Active overlay.
    pub modal: Modal,
    /// Wall clock shown in the header.
    pub now: DateTime<Local>,
    /// Draw the key binding footer.
    pub show_keybinds_footer: bool,
    /// Debounce before the sentiment popup appears.
    pub hover_delay: Duration,
    /// Delay before re-fetching sentiment after a submission.
    pub sentiment_refresh_delay: Duration,
    /// Whole terminal area of the last frame.
    pub viewport: Rect,
    /// Chart area of the last frame.
    pub chart_rect: Option<Rect>,
    /// Rendered keyword label rects for mouse hit-testing.
    pub keyword_rects: Vec<(KeywordId, Rect)>,
    /// Feed list area of the last frame.
    pub feed_rect: Option<Rect>,
    /// Rendered feed rows for mouse hit-testing.
    pub feed_rows: Vec<(usize, Rect)>,
    /// Sidebar category rows for mouse hit-testing.
    pub category_rects: Vec<(CategoryId, Rect)>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(1, DEFAULT_HOVER_DEBOUNCE, DEFAULT_SENTIMENT_REFRESH_DELAY)
    }
}

impl AppState {
    /// What: Create an empty dashboard state.
    ///
    /// Inputs:
    /// - `category`: Category shown first.
    /// - `hover_delay`: Hover debounce.
    /// - `sentiment_refresh_delay`: Delay of the post-submit sentiment refresh.
    #[must_use]
    pub fn new(category: CategoryId, hover_delay: Duration, sentiment_refresh_delay: Duration) -> Self {
        Self {
            categories: Category::builtin(),
            category,
            keywords: Vec::new(),
            last_updated: None,
            keywords_loading: true,
            sentiments: HashMap::new(),
            details: HashMap::new(),
            details_loading: HashSet::new(),
            comments: Vec::new(),
            comments_loading: true,
            feed_selected: 0,
            selected: None,
            composer: Composer::default(),
            hover: HoverState::Idle,
            hover_debounce: HoverDebounce::default(),
            keyword_focus: None,
            likes: HashSet::new(),
            likes_in_flight: HashSet::new(),
            deletes_in_flight: HashSet::new(),
            origin: None,
            focus: Focus::Chart,
            modal: Modal::None,
            now: Local::now(),
            show_keybinds_footer: true,
            hover_delay,
            sentiment_refresh_delay,
            viewport: Rect::default(),
            chart_rect: None,
            keyword_rects: Vec::new(),
            feed_rect: None,
            feed_rows: Vec::new(),
            category_rects: Vec::new(),
        }
    }

    /// Keyword with `id` in the current list.
    #[must_use]
    pub fn keyword(&self, id: KeywordId) -> Option<&Keyword> {
        self.keywords.iter().find(|k| k.id == id)
    }

    /// Display name of the active category.
    #[must_use]
    pub fn category_display(&self) -> &str {
        self.categories
            .iter()
            .find(|c| c.id == self.category)
            .map_or("", |c| c.display.as_str())
    }

    /// Comment highlighted in the feed.
    #[must_use]
    pub fn selected_comment(&self) -> Option<&Comment> {
        self.comments.get(self.feed_selected)
    }

    /// Whether the session origin has liked `comment`.
    #[must_use]
    pub fn is_liked(&self, comment: CommentId) -> bool {
        self.origin
            .as_deref()
            .is_some_and(|o| self.likes.contains(&like_key(o, comment)))
    }

    /// Whether `comment` was written from the session origin.
    #[must_use]
    pub fn is_own(&self, comment: &Comment) -> bool {
        self.origin.as_deref() == Some(comment.origin.as_str())
    }

    /// What: Re-apply feed ordering after any change to `comments`.
    ///
    /// Details:
    /// - Keeps the highlight on the same comment when it survives, else clamps the index.
    pub fn reorder_feed(&mut self) {
        let keep = self.selected_comment().map(|c| c.id);
        self.comments = order_feed(std::mem::take(&mut self.comments));
        self.feed_selected = keep
            .and_then(|id| self.comments.iter().position(|c| c.id == id))
            .unwrap_or(self.feed_selected)
            .min(self.comments.len().saturating_sub(1));
    }
}
