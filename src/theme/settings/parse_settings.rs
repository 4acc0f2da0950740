use std::time::Duration;

use crate::theme::parsing::{parse_bool, split_key_value};
use crate::theme::types::Settings;

/// What: Parse settings.conf content into `settings`.
///
/// Inputs:
/// - `content`: Content of the settings.conf file as a string.
/// - `settings`: Mutable reference to `Settings` to populate.
///
/// Output:
/// - None (modifies `settings` in-place).
///
/// Details:
/// - Unknown keys and unparsable values are ignored and leave the default in place.
/// - Several keys accept aliases (e.g. `supabase_url` for `store_url`).
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        let Some((key, val)) = split_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "store_url" | "supabase_url" => settings.store_url = val.to_string(),
            "store_key" | "supabase_key" | "anon_key" => settings.store_key = val.to_string(),
            "default_category" | "category" => {
                if let Ok(v) = val.parse() {
                    settings.default_category = v;
                }
            }
            "keyword_refresh_secs" => {
                if let Ok(v) = val.parse() {
                    settings.keyword_refresh = Duration::from_secs(v);
                }
            }
            "comment_refresh_secs" => {
                if let Ok(v) = val.parse() {
                    settings.comment_refresh = Duration::from_secs(v);
                }
            }
            "hover_debounce_ms" => {
                if let Ok(v) = val.parse() {
                    settings.hover_debounce = Duration::from_millis(v);
                }
            }
            "sentiment_refresh_delay_ms" => {
                if let Ok(v) = val.parse() {
                    settings.sentiment_refresh_delay = Duration::from_millis(v);
                }
            }
            "identity_services" => {
                settings.identity_services = val.split(',').map(str::to_string).collect();
            }
            "show_keybinds_footer" | "keybinds_visible" => {
                settings.show_keybinds_footer = parse_bool(val);
            }
            _ => tracing::debug!(key = %key, "ignoring unknown settings key"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Known keys, aliases and lenient booleans are read; junk is ignored.
    ///
    /// Inputs:
    /// - A settings file with comments, aliases, an invalid number and an unknown key.
    ///
    /// Output:
    /// - Parsed values replace defaults; the invalid number keeps its default.
    fn parse_settings_reads_known_keys() {
        let content = "\
# comment
supabase_url = https://demo.supabase.co
store-key = anon-key   # public key
default_category = 3
keyword_refresh_secs = 120
comment_refresh_secs = soon
hover.debounce.ms = 150
identity_services = https://a.example/ip, https://b.example/ip
show_keybinds_footer = off
mystery = 1
";
        let mut s = Settings::default();
        parse_settings(content, &mut s);
        assert_eq!(s.store_url, "https://demo.supabase.co");
        assert_eq!(s.store_key, "anon-key");
        assert_eq!(s.default_category, 3);
        assert_eq!(s.keyword_refresh, Duration::from_secs(120));
        assert_eq!(s.comment_refresh, Duration::from_secs(60));
        assert_eq!(s.hover_debounce, Duration::from_millis(150));
        assert_eq!(s.identity_services.len(), 2);
        assert!(!s.show_keybinds_footer);
    }
}
