use std::env;
use std::path::PathBuf;

/// Application directory name under the config base.
const APP_DIR: &str = "trendboard";

/// Non-empty value of environment variable `key`.
fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|v| !v.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
}

/// What: Directories that may hold trendboard config files, most preferred first.
///
/// Output:
/// - `$HOME/.config/trendboard`, then `$XDG_CONFIG_HOME/trendboard`; unset variables are skipped.
fn search_roots() -> Vec<PathBuf> {
    [
        env_path("HOME").map(|h| h.join(".config")),
        env_path("XDG_CONFIG_HOME"),
    ]
    .into_iter()
    .flatten()
    .map(|base| base.join(APP_DIR))
    .collect()
}

fn find_config_file(name: &str) -> Option<PathBuf> {
    search_roots()
        .into_iter()
        .map(|root| root.join(name))
        .find(|p| p.is_file())
}

/// Existing `settings.conf`, searched in priority order.
pub(crate) fn resolve_settings_config_path() -> Option<PathBuf> {
    find_config_file("settings.conf")
}

/// Existing `theme.conf`, searched in priority order.
pub(crate) fn resolve_theme_config_path() -> Option<PathBuf> {
    find_config_file("theme.conf")
}

/// What: Config directory, created on demand.
///
/// Output:
/// - The first search root that can be created; `./.config/trendboard` when neither
///   `HOME` nor `XDG_CONFIG_HOME` is usable.
pub fn config_dir() -> PathBuf {
    search_roots()
        .into_iter()
        .find(|root| std::fs::create_dir_all(root).is_ok())
        .unwrap_or_else(|| {
            let fallback = PathBuf::from(".config").join(APP_DIR);
            let _ = std::fs::create_dir_all(&fallback);
            fallback
        })
}

/// Logs directory `<config>/logs`, created on demand.
pub fn logs_dir() -> PathBuf {
    let logs = config_dir().join("logs");
    if let Err(e) = std::fs::create_dir_all(&logs) {
        tracing::debug!(path = %logs.display(), error = %e, "could not create logs dir");
    }
    logs
}

#[cfg(test)]
mod tests {
    struct HomeOverride(Option<std::ffi::OsString>);

    impl HomeOverride {
        fn set(path: &std::path::Path) -> Self {
            let prev = std::env::var_os("HOME");
            unsafe { std::env::set_var("HOME", path) };
            Self(prev)
        }
    }

    impl Drop for HomeOverride {
        fn drop(&mut self) {
            unsafe {
                match self.0.take() {
                    Some(prev) => std::env::set_var("HOME", prev),
                    None => std::env::remove_var("HOME"),
                }
            }
        }
    }

    #[test]
    /// What: Config and log directories are created under `$HOME/.config/trendboard`.
    fn paths_config_and_logs_under_home() {
        let _lock = crate::theme::test_mutex()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let tmp = tempfile::tempdir().expect("tempdir");
        let _home = HomeOverride::set(tmp.path());

        let cfg = super::config_dir();
        let logs = super::logs_dir();
        assert!(cfg.ends_with(".config/trendboard"));
        assert!(logs.ends_with("logs") && logs.is_dir());
        assert!(super::resolve_settings_config_path().is_none());

        std::fs::write(cfg.join("settings.conf"), "").expect("write");
        assert_eq!(
            super::resolve_settings_config_path(),
            Some(cfg.join("settings.conf"))
        );
    }
}
