/// Commented `settings.conf` written on first run.
pub const SETTINGS_SKELETON_CONTENT: &str = "# trendboard settings\n\
#\n\
# Format: key = value\n\
# Lines starting with # are comments; a ' #' after a value starts an inline comment.\n\
#\n\
# ---------- Record store ----------\n\
# Project URL and anonymous (public) API key of the hosted database.\n\
# TRENDBOARD_STORE_URL / TRENDBOARD_STORE_KEY override these when set.\n\
store_url =\n\
store_key =\n\
#\n\
# ---------- Dashboard ----------\n\
# 1 google, 2 netflix, 3 naver, 4 daum, 5 youtube\n\
default_category = 1\n\
keyword_refresh_secs = 300\n\
comment_refresh_secs = 60\n\
hover_debounce_ms = 200\n\
sentiment_refresh_delay_ms = 2000\n\
show_keybinds_footer = true\n\
#\n\
# ---------- Identity ----------\n\
# Services used to identify this client for like de-duplication, tried in order.\n\
identity_services = https://api.ipify.org?format=json, https://ipapi.co/json/, https://httpbin.org/ip\n";

/// Commented `theme.conf` describing the palette keys (all optional).
pub const THEME_SKELETON_CONTENT: &str = "# trendboard theme\n\
#\n\
# Format: key = #RRGGBB or R,G,B. Missing keys keep the Catppuccin Mocha default.\n\
#\n\
# background = #1e1e2e\n\
# panel = #181825\n\
# surface = #45475a\n\
# border = #9399b2\n\
# border_muted = #585b70\n\
# text = #cdd6f4\n\
# text_muted = #a6adc8\n\
# accent = #74c7ec\n\
# heading = #cba6f7\n\
# emphasis = #b4befe\n\
# positive = #a6e3a1\n\
# warning = #f9e2af\n\
# negative = #f38ba8\n";
