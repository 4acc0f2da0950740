use std::sync::Arc;

use tokio::sync::mpsc;

use crate::sources;
use crate::state::{DetailOutcome, DetailRequest, SentimentOutcome, SentimentRequest};
use crate::store::RecordStore;

/// What: Load a keyword's comment history and latest sentiment concurrently.
///
/// Output:
/// - A [`DetailOutcome`] with both halves; each half fails independently.
pub async fn load_detail(store: &dyn RecordStore, req: DetailRequest) -> DetailOutcome {
    let (comments, sentiment) = futures::join!(
        sources::fetch_keyword_comments(store, req.keyword),
        sources::fetch_latest_sentiment(store, req.keyword),
    );
    if let Err(e) = &comments {
        tracing::warn!(keyword = req.keyword, error = %e, "keyword comments fetch failed");
    }
    if let Err(e) = &sentiment {
        tracing::warn!(keyword = req.keyword, error = %e, "sentiment fetch failed");
    }
    DetailOutcome {
        keyword: req.keyword,
        comments: comments.map_err(|e| e.to_string()),
        sentiment: sentiment.map_err(|e| e.to_string()),
    }
}

/// What: Fetch a keyword's latest sentiment, after the request's delay if any.
pub async fn load_sentiment(store: &dyn RecordStore, req: SentimentRequest) -> SentimentOutcome {
    if let Some(delay) = req.delay {
        tokio::time::sleep(delay).await;
    }
    let result = sources::fetch_latest_sentiment(store, req.keyword).await;
    if let Err(e) = &result {
        tracing::warn!(keyword = req.keyword, error = %e, "sentiment fetch failed");
    }
    SentimentOutcome {
        keyword: req.keyword,
        result: result.map_err(|e| e.to_string()),
        only_if_present: req.only_if_present,
    }
}

/// What: Spawn the detail worker; each request runs in its own task.
pub fn spawn_detail_worker(
    store: Arc<dyn RecordStore>,
    mut req_rx: mpsc::UnboundedReceiver<DetailRequest>,
    res_tx: mpsc::UnboundedSender<DetailOutcome>,
) {
    tokio::spawn(async move {
        while let Some(req) = req_rx.recv().await {
            let store = Arc::clone(&store);
            let res_tx = res_tx.clone();
            tokio::spawn(async move {
                let _ = res_tx.send(load_detail(store.as_ref(), req).await);
            });
        }
    });
}

/// What: Spawn the sentiment worker; delayed requests sleep in their own task.
pub fn spawn_sentiment_worker(
    store: Arc<dyn RecordStore>,
    mut req_rx: mpsc::UnboundedReceiver<SentimentRequest>,
    res_tx: mpsc::UnboundedSender<SentimentOutcome>,
) {
    tokio::spawn(async move {
        while let Some(req) = req_rx.recv().await {
            let store = Arc::clone(&store);
            let res_tx = res_tx.clone();
            tokio::spawn(async move {
                let _ = res_tx.send(load_sentiment(store.as_ref(), req).await);
            });
        }
    });
}
