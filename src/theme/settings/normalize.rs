use std::time::Duration;

use crate::sources::identity::DEFAULT_IDENTITY_SERVICES;
use crate::state::Category;
use crate::theme::types::Settings;

/// Shortest accepted keyword poll interval.
const MIN_KEYWORD_REFRESH: Duration = Duration::from_secs(10);
/// Shortest accepted comment poll interval.
const MIN_COMMENT_REFRESH: Duration = Duration::from_secs(5);

/// What: Normalize settings values parsed from configuration files.
///
/// Inputs:
/// - `settings`: Mutable reference to `Settings` to normalize in-place.
///
/// Output:
/// - None (modifies `settings` in-place).
///
/// Details:
/// - Trims the store URL (dropping trailing slashes) and key.
/// - Raises poll intervals to their minimums.
/// - Falls back to category 1 for ids outside the built-in table.
/// - Drops empty identity service entries, restoring the defaults when none remain.
pub fn normalize(settings: &mut Settings) {
    settings.store_url = settings.store_url.trim().trim_end_matches('/').to_string();
    settings.store_key = settings.store_key.trim().to_string();
    settings.keyword_refresh = settings.keyword_refresh.max(MIN_KEYWORD_REFRESH);
    settings.comment_refresh = settings.comment_refresh.max(MIN_COMMENT_REFRESH);
    if !Category::builtin()
        .iter()
        .any(|c| c.id == settings.default_category)
    {
        tracing::warn!(
            category = settings.default_category,
            "unknown default_category; using 1"
        );
        settings.default_category = 1;
    }
    settings.identity_services = settings
        .identity_services
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if settings.identity_services.is_empty() {
        settings.identity_services = DEFAULT_IDENTITY_SERVICES
            .iter()
            .map(|s| (*s).to_string())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Out-of-range values are pulled back to safe defaults.
    fn normalize_clamps_values() {
        let mut s = Settings {
            store_url: " https://x.supabase.co/ ".into(),
            keyword_refresh: Duration::from_secs(1),
            comment_refresh: Duration::ZERO,
            default_category: 77,
            identity_services: vec![" ".into(), " https://a.example ".into()],
            ..Settings::default()
        };
        normalize(&mut s);
        assert_eq!(s.store_url, "https://x.supabase.co");
        assert_eq!(s.keyword_refresh, MIN_KEYWORD_REFRESH);
        assert_eq!(s.comment_refresh, MIN_COMMENT_REFRESH);
        assert_eq!(s.default_category, 1);
        assert_eq!(s.identity_services, vec!["https://a.example".to_string()]);
    }
}
