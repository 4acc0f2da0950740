use ratatui::{Terminal, backend::CrosstermBackend};

use crate::state::CategoryId;
use crate::theme::settings;
use crate::util::is_headless;

use super::terminal::{restore_terminal, setup_terminal};

mod channels;
mod cleanup;
mod event_loop;
pub mod handlers;
mod init;
pub mod workers;

use channels::Channels;
use cleanup::cleanup_on_exit;
use event_loop::run_event_loop;
use init::{build_context, initialize_app_state, sync_schedule};
use workers::auxiliary::spawn_event_thread;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Start-up options taken from the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Use the seeded in-memory store instead of the remote one.
    pub demo: bool,
    /// Category shown first, overriding `default_category`.
    pub category: Option<CategoryId>,
    /// Store URL overriding `store_url`.
    pub store_url: Option<String>,
}

/// What: Run the trendboard TUI end-to-end: load settings, pick the store, spawn the
/// workers, drive the event loop, and restore the terminal on exit.
///
/// Inputs:
/// - `options`: Command-line overrides.
///
/// Output:
/// - `Ok(())` when the UI exits cleanly; `Err` on start-up or terminal errors.
///
/// Details:
/// - The store is chosen before the terminal is touched, so configuration errors
///   print normally.
/// - Headless mode (`TRENDBOARD_TEST_HEADLESS=1`) skips the terminal and the input
///   thread and always uses the demo store.
pub async fn run(options: RunOptions) -> Result<()> {
    let headless = is_headless();
    let prefs = settings();
    let ctx = build_context(&prefs, &options, headless)?;
    let mut app = initialize_app_state(&prefs, &options);
    let mut channels = Channels::new(&ctx, sync_schedule(&prefs), app.category);

    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };

    spawn_event_thread(
        headless,
        channels.event_tx.clone(),
        channels.event_thread_cancelled.clone(),
    );
    tracing::info!(category = app.category, demo = options.demo, "dashboard started");

    run_event_loop(&mut terminal, &mut app, &mut channels).await;

    cleanup_on_exit(&mut app, &channels);
    if !headless {
        restore_terminal()?;
    }
    Ok(())
}
