use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::MissedTickBehavior;

use crate::sources;
use crate::state::{CategoryId, SyncCommand, SyncEvent};
use crate::store::RecordStore;

use super::WorkerContext;

/// Poll intervals for the sync supervisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncSchedule {
    /// Keyword list refresh.
    pub keywords: Duration,
    /// Comment feed refresh.
    pub comments: Duration,
}

impl Default for SyncSchedule {
    fn default() -> Self {
        Self {
            keywords: Duration::from_secs(300),
            comments: Duration::from_secs(60),
        }
    }
}

/// What: Spawn a task that fetches `category`'s keywords now and then every `every`.
///
/// Output:
/// - Abort handle of the poll task.
fn spawn_keyword_poll(
    store: Arc<dyn RecordStore>,
    category: CategoryId,
    every: Duration,
    tx: mpsc::UnboundedSender<SyncEvent>,
) -> AbortHandle {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let result = sources::fetch_keywords(store.as_ref(), category).await;
            match &result {
                Ok(list) => tracing::debug!(category, count = list.len(), "keywords fetched"),
                Err(e) => tracing::warn!(category, error = %e, "keyword fetch failed"),
            }
            let event = SyncEvent::Keywords {
                category,
                result: result.map_err(|e| e.to_string()),
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    })
    .abort_handle()
}

/// Fetch the comment feed once and report it.
async fn fetch_feed(store: &dyn RecordStore, tx: &mpsc::UnboundedSender<SyncEvent>) -> bool {
    let result = sources::fetch_recent_comments(store).await;
    match &result {
        Ok(list) => tracing::debug!(count = list.len(), "comments fetched"),
        Err(e) => tracing::warn!(error = %e, "comment fetch failed"),
    }
    tx.send(SyncEvent::Comments(result.map_err(|e| e.to_string())))
        .is_ok()
}

/// Spawn the comment feed poll: now, then every `every`.
fn spawn_comment_poll(
    store: Arc<dyn RecordStore>,
    every: Duration,
    tx: mpsc::UnboundedSender<SyncEvent>,
) -> AbortHandle {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if !fetch_feed(store.as_ref(), &tx).await {
                break;
            }
        }
    })
    .abort_handle()
}

/// What: One-shot loads: category table and the session's like history.
///
/// Details:
/// - A failed history fetch still reports the resolved origin with an empty list so
///   ownership checks work.
fn spawn_startup_loads(ctx: &WorkerContext, tx: &mpsc::UnboundedSender<SyncEvent>) -> Vec<AbortHandle> {
    let store = Arc::clone(&ctx.store);
    let categories_tx = tx.clone();
    let categories = tokio::spawn(async move {
        let result = sources::fetch_categories(store.as_ref()).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "category fetch failed; keeping built-in table");
        }
        let _ = categories_tx.send(SyncEvent::Categories(result.map_err(|e| e.to_string())));
    });

    let ctx = ctx.clone();
    let history_tx = tx.clone();
    let history = tokio::spawn(async move {
        let origin = ctx.identity.resolve().await;
        let comments = match sources::fetch_like_history(ctx.store.as_ref(), &origin).await {
            Ok(ids) => {
                tracing::info!(count = ids.len(), "like history loaded");
                ids
            }
            Err(e) => {
                tracing::warn!(error = %e, "like history fetch failed");
                Vec::new()
            }
        };
        let _ = history_tx.send(SyncEvent::LikeHistory { origin, comments });
    });
    vec![categories.abort_handle(), history.abort_handle()]
}

/// What: Spawn the sync supervisor.
///
/// Inputs:
/// - `ctx`: Store and identity handles.
/// - `schedule`: Poll intervals.
/// - `category`: Category polled first.
/// - `cmd_rx`: Supervisor commands.
/// - `event_tx`: Results towards the event loop.
///
/// Output:
/// - Join handle of the supervisor; it finishes after `Shutdown` or when `cmd_rx` closes.
///
/// Details:
/// - Every poll runs as its own abortable task; a category change aborts only the
///   keyword poll and starts a new one with an immediate fetch.
/// - All child tasks are aborted before the supervisor returns.
pub fn spawn_sync_worker(
    ctx: WorkerContext,
    schedule: SyncSchedule,
    category: CategoryId,
    mut cmd_rx: mpsc::UnboundedReceiver<SyncCommand>,
    event_tx: mpsc::UnboundedSender<SyncEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut keywords = spawn_keyword_poll(
            Arc::clone(&ctx.store),
            category,
            schedule.keywords,
            event_tx.clone(),
        );
        let comments = spawn_comment_poll(Arc::clone(&ctx.store), schedule.comments, event_tx.clone());
        let mut oneshots = spawn_startup_loads(&ctx, &event_tx);

        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                SyncCommand::SetCategory(next) => {
                    keywords.abort();
                    keywords = spawn_keyword_poll(
                        Arc::clone(&ctx.store),
                        next,
                        schedule.keywords,
                        event_tx.clone(),
                    );
                    tracing::debug!(category = next, "keyword schedule restarted");
                }
                SyncCommand::RefreshComments => {
                    let store = Arc::clone(&ctx.store);
                    let tx = event_tx.clone();
                    oneshots.retain(|h| !h.is_finished());
                    oneshots.push(
                        tokio::spawn(async move {
                            fetch_feed(store.as_ref(), &tx).await;
                        })
                        .abort_handle(),
                    );
                }
                SyncCommand::Shutdown => break,
            }
        }

        keywords.abort();
        comments.abort();
        for h in oneshots {
            h.abort();
        }
        tracing::debug!("sync supervisor stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::IdentityResolver;
    use crate::store::demo_store;

    fn context() -> (WorkerContext, Arc<crate::store::MemoryStore>) {
        let store = Arc::new(demo_store());
        let ctx = WorkerContext::new(store.clone(), IdentityResolver::fixed("203.0.113.7"));
        (ctx, store)
    }

    #[tokio::test(start_paused = true)]
    /// What: Start-up delivers keywords, comments, categories and like history; polls repeat.
    ///
    /// Inputs:
    /// - Demo store and a 10s keyword / 5s comment schedule.
    ///
    /// Output:
    /// - Four start-up events, then another keyword fetch after the interval.
    async fn supervisor_polls_and_loads_once() {
        let (ctx, store) = context();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let schedule = SyncSchedule {
            keywords: Duration::from_secs(10),
            comments: Duration::from_secs(5),
        };
        let handle = spawn_sync_worker(ctx, schedule, 2, cmd_rx, tx);

        let mut seen = (0, 0, 0, 0);
        for _ in 0..4 {
            match rx.recv().await.expect("event") {
                SyncEvent::Keywords { category, result } => {
                    assert_eq!(category, 2);
                    assert!(result.is_ok());
                    seen.0 += 1;
                }
                SyncEvent::Comments(r) => {
                    assert!(r.is_ok());
                    seen.1 += 1;
                }
                SyncEvent::Categories(_) => seen.2 += 1,
                SyncEvent::LikeHistory { origin, .. } => {
                    assert_eq!(origin, "203.0.113.7");
                    seen.3 += 1;
                }
            }
        }
        assert_eq!(seen, (1, 1, 1, 1));

        tokio::time::sleep(Duration::from_secs(11)).await;
        while rx.try_recv().is_ok() {}
        assert_eq!(store.count_requests("select", "search_term_keyword"), 2);
        assert!(store.count_requests("select", "comment") >= 3);

        cmd_tx.send(SyncCommand::Shutdown).expect("send");
        handle.await.expect("join");
    }

    #[tokio::test(start_paused = true)]
    /// What: A category change fetches the new category immediately.
    async fn category_change_restarts_keyword_poll() {
        let (ctx, _store) = context();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_sync_worker(ctx, SyncSchedule::default(), 1, cmd_rx, tx);
        cmd_tx.send(SyncCommand::SetCategory(4)).expect("send");

        let mut categories = Vec::new();
        while categories.len() < 2 {
            if let Some(SyncEvent::Keywords { category, .. }) = rx.recv().await {
                categories.push(category);
            }
        }
        assert!(categories.contains(&4));
        drop(cmd_tx);
        handle.await.expect("join");
    }
}
