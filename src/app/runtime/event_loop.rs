use ratatui::Terminal;
use tokio::select;

use crate::state::AppState;
use crate::state::interaction::hover_timer_fired;
use crate::ui::ui;

use super::channels::Channels;
use super::handlers::{
    apply_action_outcome, apply_detail_outcome, apply_sentiment_outcome, apply_sync_event,
    handle_tick,
};

/// What: Await the next message on any channel and fold it into `app`.
///
/// Output: `true` once the loop should stop (quit key, or every sender dropped).
async fn next_message(app: &mut AppState, channels: &mut Channels) -> bool {
    select! {
        Some(ev) = channels.event_rx.recv() => {
            crate::events::handle_event(&ev, app, &channels.dispatch)
        }
        Some(generation) = channels.hover_rx.recv() => {
            hover_timer_fired(app, generation, &channels.dispatch);
            false
        }
        Some(event) = channels.sync_rx.recv() => {
            apply_sync_event(app, event);
            false
        }
        Some(outcome) = channels.detail_res_rx.recv() => {
            apply_detail_outcome(app, outcome);
            false
        }
        Some(outcome) = channels.sentiment_res_rx.recv() => {
            apply_sentiment_outcome(app, outcome);
            false
        }
        Some(outcome) = channels.action_res_rx.recv() => {
            apply_action_outcome(app, outcome, &channels.dispatch);
            false
        }
        Some(()) = channels.tick_rx.recv() => {
            handle_tick(app);
            false
        }
        else => true
    }
}

/// What: Drive the dashboard until quit.
///
/// Inputs:
/// - `terminal`: Target for frames; `None` when headless, in which case only state advances.
/// - `app`: Dashboard state.
/// - `channels`: Worker and input receivers plus the outbound dispatcher.
///
/// Details:
/// - One frame is drawn per handled message; a failed draw is logged and the loop
///   carries on.
pub async fn run_event_loop(
    terminal: &mut Option<Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>>,
    app: &mut AppState,
    channels: &mut Channels,
) {
    loop {
        if let Some(t) = terminal.as_mut()
            && let Err(e) = t.draw(|f| ui(f, app))
        {
            tracing::warn!(error = %e, "frame render failed");
        }

        if next_message(app, channels).await {
            break;
        }
    }
}
