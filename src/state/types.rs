//! Core value types used by trendboard state.

use chrono::{DateTime, Utc};

/// Primary key of a trending keyword.
pub type KeywordId = i64;
/// Primary key of a comment.
pub type CommentId = i64;
/// Primary key of a keyword category.
pub type CategoryId = i64;

/// Author tag stored with every comment.
pub const ANONYMOUS_NICKNAME: &str = "익명";
/// Keyword label shown when a comment's keyword join is missing.
pub const UNKNOWN_KEYWORD: &str = "알 수 없음";
/// Message shown when no sentiment record exists for a keyword.
pub const SENTIMENT_UNAVAILABLE: &str = "비율 계산 안됨";
/// A comment with strictly more likes than this is popular.
pub const POPULAR_THRESHOLD: i64 = 5;
/// Maximum comment length in characters.
pub const MAX_COMMENT_CHARS: usize = 500;

/// A keyword category (search engine / platform the trends come from).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Category id as stored remotely.
    pub id: CategoryId,
    /// Machine name, e.g. `google`.
    pub name: String,
    /// Display name shown in the sidebar.
    pub display: String,
}

/// Built-in category table: `(id, machine name, display name)`.
const BUILTIN_CATEGORIES: [(CategoryId, &str, &str); 5] = [
    (1, "google", "구글"),
    (2, "netflix", "넷플릭스"),
    (3, "naver", "네이버"),
    (4, "daum", "다음"),
    (5, "youtube", "유튜브"),
];

impl Category {
    /// The five categories the dashboard ships with.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        BUILTIN_CATEGORIES
            .iter()
            .map(|(id, name, display)| Self {
                id: *id,
                name: (*name).to_string(),
                display: (*display).to_string(),
            })
            .collect()
    }

    /// What: Machine name for a category id.
    ///
    /// Output:
    /// - The built-in machine name, or `"google"` for unknown ids.
    #[must_use]
    pub fn machine_name_for(id: CategoryId) -> &'static str {
        BUILTIN_CATEGORIES
            .iter()
            .find(|(cid, _, _)| *cid == id)
            .map_or("google", |(_, name, _)| name)
    }

    /// Display name for a machine name, when it is a built-in one.
    #[must_use]
    pub fn display_for(name: &str) -> Option<&'static str> {
        BUILTIN_CATEGORIES
            .iter()
            .find(|(_, n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, _, display)| *display)
    }
}

/// A trending keyword placed on the circular chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyword {
    /// Keyword id.
    pub id: KeywordId,
    /// Display text.
    pub text: String,
    /// Rank, 1 = hottest.
    pub rank: u32,
    /// Chart angle in degrees, derived from list position (0° = up).
    pub angle: f64,
    /// Category the keyword belongs to.
    pub category_id: CategoryId,
    /// When the keyword row was created.
    pub created_at: DateTime<Utc>,
}

/// A comment in the live feed.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    /// Comment id.
    pub id: CommentId,
    /// Keyword the comment belongs to.
    pub keyword_id: KeywordId,
    /// Joined keyword display text.
    pub keyword_name: String,
    /// Joined category machine name.
    pub category_name: String,
    /// Comment body.
    pub text: String,
    /// Author tag (always the anonymous placeholder for new comments).
    pub author: String,
    /// Origin identifier of the author (network address or synthetic id).
    pub origin: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Like count.
    pub likes: i64,
    /// `likes > POPULAR_THRESHOLD`.
    pub popular: bool,
}

impl Comment {
    /// Set the like count and recompute the popular flag.
    pub fn set_likes(&mut self, likes: i64) {
        self.likes = likes;
        self.popular = likes > POPULAR_THRESHOLD;
    }
}

/// One entry of a keyword's comment history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentDetail {
    /// Comment body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Like count.
    pub likes: i64,
}

/// Where a sentiment split came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SentimentStatus {
    /// Never fetched; the split is a neutral 500/500.
    Placeholder,
    /// Computed from a stored analysis record.
    Computed,
    /// No analysis is available; the widget shows `message` instead of the chart.
    Uncomputed {
        /// Human readable reason.
        message: String,
    },
}

/// Positive/negative split for a keyword, scaled to integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentimentSnapshot {
    /// Positive weight (`round(rate * 1000)`).
    pub positive: u32,
    /// Negative weight (`round(rate * 1000)`).
    pub negative: u32,
    /// Origin of the numbers.
    pub status: SentimentStatus,
}

impl SentimentSnapshot {
    /// Neutral split used before the first fetch.
    #[must_use]
    pub const fn placeholder() -> Self {
        Self {
            positive: 500,
            negative: 500,
            status: SentimentStatus::Placeholder,
        }
    }

    /// What: Build a computed snapshot from stored rates.
    ///
    /// Inputs:
    /// - `positive_rate`/`negative_rate`: Fractions in `[0, 1]`.
    ///
    /// Output:
    /// - Weights `round(rate * 1000)`; negative or non-finite rates become 0.
    #[must_use]
    pub fn computed(positive_rate: f64, negative_rate: f64) -> Self {
        Self {
            positive: scale_rate(positive_rate),
            negative: scale_rate(negative_rate),
            status: SentimentStatus::Computed,
        }
    }

    /// Error snapshot carrying `message`, with a neutral split.
    #[must_use]
    pub fn uncomputed(message: impl Into<String>) -> Self {
        Self {
            positive: 500,
            negative: 500,
            status: SentimentStatus::Uncomputed {
                message: message.into(),
            },
        }
    }

    /// Whether hovering should trigger a fresh fetch.
    #[must_use]
    pub const fn needs_fetch(&self) -> bool {
        !matches!(self.status, SentimentStatus::Computed)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_rate(rate: f64) -> u32 {
    if rate.is_finite() && rate > 0.0 {
        (rate * 1000.0).round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// A terminal cell position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellPos {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl CellPos {
    /// Construct a position.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Hover sub-machine of the chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    /// Nothing hovered.
    #[default]
    Idle,
    /// Pointer rests on `keyword`; the debounce timer is running.
    Pending {
        /// Hovered keyword.
        keyword: KeywordId,
        /// Last pointer cell.
        pointer: CellPos,
    },
    /// Debounce elapsed; the sentiment popup is shown at a frozen anchor.
    Stable {
        /// Hovered keyword.
        keyword: KeywordId,
        /// Frozen popup anchor.
        anchor: CellPos,
    },
}

impl HoverState {
    /// Keyword currently hovered, pending or stable.
    #[must_use]
    pub const fn keyword(&self) -> Option<KeywordId> {
        match self {
            Self::Idle => None,
            Self::Pending { keyword, .. } | Self::Stable { keyword, .. } => Some(*keyword),
        }
    }
}

/// Comment composer bound to the selected keyword.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Composer {
    /// Text being typed.
    pub text: String,
    /// A submission is in flight.
    pub submitting: bool,
}

/// Which pane receives keyboard navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    /// Keyword chart.
    #[default]
    Chart,
    /// Comment feed.
    Feed,
}

/// Outcome of a like attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The origin already liked this comment.
    AlreadyLiked,
    /// Like stored; `likes` is the new count.
    Liked {
        /// Count after the increment.
        likes: i64,
    },
    /// The comment no longer exists.
    Missing,
}

/// Key under which a like is recorded in the local like set.
#[must_use]
pub fn like_key(origin: &str, comment: CommentId) -> String {
    format!("{origin}-{comment}")
}
