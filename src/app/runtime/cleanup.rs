use std::sync::atomic::Ordering;

use crate::state::{AppState, SyncCommand};

use super::channels::Channels;

/// What: Stop background work on exit.
///
/// Inputs:
/// - `app`: Application state
/// - `channels`: Communication channels
///
/// Details:
/// - Aborts the hover debounce, stops the sync supervisor (which aborts its polls),
///   and signals the event reading thread to exit.
pub fn cleanup_on_exit(app: &mut AppState, channels: &Channels) {
    tracing::debug!("main loop exited, stopping workers");
    app.hover_debounce.cancel();
    let _ = channels.dispatch.sync_tx.send(SyncCommand::Shutdown);
    channels
        .event_thread_cancelled
        .store(true, Ordering::Relaxed);
}
