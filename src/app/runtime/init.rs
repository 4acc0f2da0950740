use std::sync::Arc;

use crate::sources::IdentityResolver;
use crate::state::AppState;
use crate::store::{DEMO_ORIGIN, RecordStore, RestStore, demo_store};
use crate::theme::Settings;

use super::workers::WorkerContext;
use super::workers::sync::SyncSchedule;
use super::{Result, RunOptions};

/// What: Build the initial `AppState` from settings and command-line options.
///
/// Details:
/// - `--category` wins over `default_category`; unknown ids fall back to the setting.
pub fn initialize_app_state(settings: &Settings, options: &RunOptions) -> AppState {
    let mut app = AppState::new(
        settings.default_category,
        settings.hover_debounce,
        settings.sentiment_refresh_delay,
    );
    app.show_keybinds_footer = settings.show_keybinds_footer;
    if let Some(c) = options.category {
        if app.categories.iter().any(|k| k.id == c) {
            app.category = c;
        } else {
            tracing::warn!(category = c, "unknown --category; using configured default");
        }
    }
    app
}

/// Poll intervals from settings.
pub const fn sync_schedule(settings: &Settings) -> SyncSchedule {
    SyncSchedule {
        keywords: settings.keyword_refresh,
        comments: settings.comment_refresh,
    }
}

/// What: Choose the store backend and identity resolver.
///
/// Inputs:
/// - `settings`: Connection settings (URL, key, identity services).
/// - `options`: `--demo` and `--store-url`.
/// - `headless`: Test mode; always uses the demo store.
///
/// Output:
/// - Worker context, or an error when no store is configured outside demo mode.
///
/// # Errors
/// - Missing URL or key, or a client that cannot be built.
pub fn build_context(settings: &Settings, options: &RunOptions, headless: bool) -> Result<WorkerContext> {
    if options.demo || headless {
        tracing::info!(headless, "using in-memory demo store");
        let store: Arc<dyn RecordStore> = Arc::new(demo_store());
        return Ok(WorkerContext::new(store, IdentityResolver::fixed(DEMO_ORIGIN)));
    }
    let url = options
        .store_url
        .as_deref()
        .map_or(settings.store_url.as_str(), str::trim)
        .trim_end_matches('/');
    let store = RestStore::new(url, &settings.store_key)?;
    tracing::info!(url = %url, "using remote record store");
    Ok(WorkerContext::new(
        Arc::new(store),
        IdentityResolver::new(settings.identity_services.clone()),
    ))
}
