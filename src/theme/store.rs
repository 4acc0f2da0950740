use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use super::parsing::{parse_color_value, split_key_value};
use super::paths::{config_dir, resolve_theme_config_path};
use super::skeletons::THEME_SKELETON_CONTENT;
use super::types::Theme;

/// Global theme, loaded once per process.
static THEME_STORE: OnceLock<Theme> = OnceLock::new();

/// What: Apply `theme.conf` content on top of `base`.
///
/// Inputs:
/// - `content`: Raw file content.
/// - `base`: Palette providing values for keys the file omits.
///
/// Output:
/// - The merged palette and a list of diagnostics for unknown keys or bad colours.
///
/// Details:
/// - Accepts a few aliases (`text_primary`, `background_base`, ...) so palettes
///   written for other Catppuccin-style configs load unchanged.
pub(crate) fn parse_theme(content: &str, base: Theme) -> (Theme, Vec<String>) {
    let mut t = base;
    let mut errors = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let Some((key, val)) = split_key_value(line) else {
            continue;
        };
        let Some(color) = parse_color_value(val) else {
            errors.push(format!("line {}: invalid colour for '{key}'", idx + 1));
            continue;
        };
        let slot = match key.as_str() {
            "background" | "background_base" | "base" => &mut t.background,
            "panel" | "background_mantle" | "mantle" => &mut t.panel,
            "surface" | "surface_1" | "surface1" => &mut t.surface,
            "border" | "overlay_2" | "overlay2" => &mut t.border,
            "border_muted" | "overlay_0" | "overlay0" => &mut t.border_muted,
            "text" | "text_primary" => &mut t.text,
            "text_muted" | "text_secondary" | "subtext_0" | "subtext0" => &mut t.text_muted,
            "accent" | "accent_interactive" | "sapphire" => &mut t.accent,
            "heading" | "accent_heading" | "mauve" => &mut t.heading,
            "emphasis" | "accent_emphasis" | "lavender" => &mut t.emphasis,
            "positive" | "semantic_success" | "green" => &mut t.positive,
            "warning" | "semantic_warning" | "yellow" => &mut t.warning,
            "negative" | "semantic_error" | "red" => &mut t.negative,
            _ => {
                errors.push(format!("line {}: unknown key '{key}'", idx + 1));
                continue;
            }
        };
        *slot = color;
    }
    (t, errors)
}

/// What: Load a palette from `path`, logging diagnostics.
///
/// Output:
/// - The parsed palette, or the default when the file cannot be read.
fn load_theme_from_file(path: &Path) -> Theme {
    match fs::read_to_string(path) {
        Ok(content) => {
            let (theme, errors) = parse_theme(&content, Theme::default());
            for e in &errors {
                tracing::warn!(path = %path.display(), error = %e, "theme configuration issue");
            }
            tracing::info!(path = %path.display(), "loaded theme configuration");
            theme
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read theme; using defaults");
            Theme::default()
        }
    }
}

fn load_initial_theme() -> Theme {
    if let Some(path) = resolve_theme_config_path() {
        return load_theme_from_file(&path);
    }
    let target = config_dir().join("theme.conf");
    if let Err(e) = fs::write(&target, THEME_SKELETON_CONTENT) {
        tracing::debug!(path = %target.display(), error = %e, "could not write theme skeleton");
    }
    Theme::default()
}

/// Return the application's theme palette, loading `theme.conf` on first use.
///
/// Missing or partial files fall back to the Catppuccin Mocha defaults key by key.
pub fn theme() -> Theme {
    *THEME_STORE.get_or_init(load_initial_theme)
}
