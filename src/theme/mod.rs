//! Theme and settings for trendboard.
//!
//! Both files live under `$HOME/.config/trendboard/` and share one line-based
//! `key = value` parser. Public re-exports keep the `crate::theme::*` API stable.

/// Configuration parsing utilities.
mod parsing;
/// Path resolution for config directories.
mod paths;
/// Settings loading, normalisation and environment overrides.
mod settings;
/// Commented first-run skeletons.
mod skeletons;
/// Theme store.
mod store;
/// Theme and settings type definitions.
mod types;

pub use paths::{config_dir, logs_dir};
pub use settings::{apply_env_overrides, load_settings_from, parse_settings, settings};
pub use skeletons::SETTINGS_SKELETON_CONTENT;
pub use store::theme;
pub use types::{Settings, Theme};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize environment-mutating tests.
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
