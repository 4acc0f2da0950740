use std::time::Duration;

use ratatui::style::Color;

use crate::sources::identity::DEFAULT_IDENTITY_SERVICES;
use crate::state::CategoryId;

/// Colour palette used by every widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Canvas background.
    pub background: Color,
    /// Panel background, slightly lighter than the canvas.
    pub panel: Color,
    /// Surface behind highlighted rows and inputs.
    pub surface: Color,
    /// Regular borders.
    pub border: Color,
    /// Low-contrast lines (chart rings, connectors).
    pub border_muted: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text (timestamps, masked origins).
    pub text_muted: Color,
    /// Interactive accent (selection, focus).
    pub accent: Color,
    /// Headings and titles.
    pub heading: Color,
    /// Rank badges and emphasis.
    pub emphasis: Color,
    /// Positive sentiment.
    pub positive: Color,
    /// Popular comments and warnings.
    pub warning: Color,
    /// Negative sentiment and errors.
    pub negative: Color,
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self {
            background: Color::Rgb(0x1e, 0x1e, 0x2e),
            panel: Color::Rgb(0x18, 0x18, 0x25),
            surface: Color::Rgb(0x45, 0x47, 0x5a),
            border: Color::Rgb(0x93, 0x99, 0xb2),
            border_muted: Color::Rgb(0x58, 0x5b, 0x70),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            text_muted: Color::Rgb(0xa6, 0xad, 0xc8),
            accent: Color::Rgb(0x74, 0xc7, 0xec),
            heading: Color::Rgb(0xcb, 0xa6, 0xf7),
            emphasis: Color::Rgb(0xb4, 0xbe, 0xfe),
            positive: Color::Rgb(0xa6, 0xe3, 0xa1),
            warning: Color::Rgb(0xf9, 0xe2, 0xaf),
            negative: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }
}

/// User-configurable settings parsed from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Record store project URL.
    pub store_url: String,
    /// Record store anonymous API key.
    pub store_key: String,
    /// Category shown at start-up.
    pub default_category: CategoryId,
    /// Keyword poll interval.
    pub keyword_refresh: Duration,
    /// Comment feed poll interval.
    pub comment_refresh: Duration,
    /// Hover debounce before the sentiment popup.
    pub hover_debounce: Duration,
    /// Delay of the post-submit sentiment refresh.
    pub sentiment_refresh_delay: Duration,
    /// Origin identification services, tried in order.
    pub identity_services: Vec<String>,
    /// Show the key binding footer.
    pub show_keybinds_footer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_url: String::new(),
            store_key: String::new(),
            default_category: 1,
            keyword_refresh: Duration::from_secs(300),
            comment_refresh: Duration::from_secs(60),
            hover_debounce: Duration::from_millis(200),
            sentiment_refresh_delay: Duration::from_millis(2000),
            identity_services: DEFAULT_IDENTITY_SERVICES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            show_keybinds_footer: true,
        }
    }
}
