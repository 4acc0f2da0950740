use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::state::{ActionOutcome, CategoryId, DetailOutcome, Dispatch, SentimentOutcome, SyncEvent};

use super::workers::WorkerContext;
use super::workers::actions::spawn_action_worker;
use super::workers::auxiliary::spawn_tick_worker;
use super::workers::detail::{spawn_detail_worker, spawn_sentiment_worker};
use super::workers::sync::{SyncSchedule, spawn_sync_worker};

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - Holds the receiving ends the event loop selects over and the [`Dispatch`]
///   senders the interaction layer uses to reach the workers.
pub struct Channels {
    /// Terminal events (sender shared with the event thread).
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Terminal events.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Set on exit to stop the event thread.
    pub event_thread_cancelled: Arc<AtomicBool>,
    /// Clock ticks.
    pub tick_rx: mpsc::UnboundedReceiver<()>,
    /// Sync supervisor results.
    pub sync_rx: mpsc::UnboundedReceiver<SyncEvent>,
    /// Keyword detail results.
    pub detail_res_rx: mpsc::UnboundedReceiver<DetailOutcome>,
    /// Sentiment results.
    pub sentiment_res_rx: mpsc::UnboundedReceiver<SentimentOutcome>,
    /// Store write results.
    pub action_res_rx: mpsc::UnboundedReceiver<ActionOutcome>,
    /// Hover debounce expiries.
    pub hover_rx: mpsc::UnboundedReceiver<u64>,
    /// Senders towards the workers.
    pub dispatch: Dispatch,
}

impl Channels {
    /// What: Create all channels and spawn the background workers.
    ///
    /// Inputs:
    /// - `ctx`: Store and identity handles shared by the workers.
    /// - `schedule`: Poll intervals.
    /// - `category`: Category polled first.
    ///
    /// Output:
    /// - A `Channels` struct with all senders and receivers initialized.
    ///
    /// Details:
    /// - Must be called inside a tokio runtime.
    pub fn new(ctx: &WorkerContext, schedule: SyncSchedule, category: CategoryId) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (sync_tx, sync_rx) = mpsc::unbounded_channel();
        let (detail_res_tx, detail_res_rx) = mpsc::unbounded_channel();
        let (sentiment_res_tx, sentiment_res_rx) = mpsc::unbounded_channel();
        let (action_res_tx, action_res_rx) = mpsc::unbounded_channel();
        let (dispatch, rx) = Dispatch::channel();

        spawn_sync_worker(ctx.clone(), schedule, category, rx.sync_rx, sync_tx);
        spawn_detail_worker(Arc::clone(&ctx.store), rx.detail_rx, detail_res_tx);
        spawn_sentiment_worker(Arc::clone(&ctx.store), rx.sentiment_rx, sentiment_res_tx);
        spawn_action_worker(ctx.clone(), rx.action_rx, action_res_tx);
        spawn_tick_worker(&tick_tx);

        Self {
            event_tx,
            event_rx,
            event_thread_cancelled: Arc::new(AtomicBool::new(false)),
            tick_rx,
            sync_rx,
            detail_res_rx,
            sentiment_res_rx,
            action_res_rx,
            hover_rx: rx.hover_rx,
            dispatch,
        }
    }
}
