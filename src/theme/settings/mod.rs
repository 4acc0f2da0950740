use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::paths::{config_dir, resolve_settings_config_path};
use crate::theme::skeletons::SETTINGS_SKELETON_CONTENT;
use crate::theme::types::Settings;

mod normalize;
mod parse_settings;

use normalize::normalize;
pub use parse_settings::parse_settings;

/// What: Load settings from `path`, without environment overrides.
///
/// Output:
/// - Parsed and normalised settings; defaults when the file cannot be read.
#[must_use]
pub fn load_settings_from(path: &Path) -> Settings {
    let mut out = Settings::default();
    match fs::read_to_string(path) {
        Ok(content) => parse_settings(&content, &mut out),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to read settings"),
    }
    normalize(&mut out);
    out
}

/// What: Apply `TRENDBOARD_STORE_URL` / `TRENDBOARD_STORE_KEY` when set and non-empty.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(url) = env::var("TRENDBOARD_STORE_URL")
        && !url.trim().is_empty()
    {
        settings.store_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Ok(key) = env::var("TRENDBOARD_STORE_KEY")
        && !key.trim().is_empty()
    {
        settings.store_key = key.trim().to_string();
    }
}

/// What: Ensure a settings file exists, writing the commented skeleton on first run.
///
/// Output:
/// - Path of the existing or newly written file; `None` when writing fails.
pub fn ensure_settings_file() -> Option<PathBuf> {
    if let Some(p) = resolve_settings_config_path() {
        return Some(p);
    }
    let target = config_dir().join("settings.conf");
    match fs::write(&target, SETTINGS_SKELETON_CONTENT) {
        Ok(()) => {
            tracing::info!(path = %target.display(), "wrote default settings skeleton");
            Some(target)
        }
        Err(e) => {
            tracing::warn!(path = %target.display(), error = %e, "failed to write settings skeleton");
            None
        }
    }
}

/// What: Load user settings from `settings.conf` under HOME/XDG plus environment overrides.
///
/// Output:
/// - A `Settings` value; falls back to `Settings::default()` when missing or invalid.
#[must_use]
pub fn settings() -> Settings {
    let mut out = ensure_settings_file().map_or_else(Settings::default, |p| load_settings_from(&p));
    apply_env_overrides(&mut out);
    tracing::debug!(
        store_configured = !out.store_url.is_empty(),
        category = out.default_category,
        "settings loaded"
    );
    out
}
