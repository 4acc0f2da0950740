use tokio::sync::mpsc;

use crate::sources;
use crate::state::{ActionOutcome, ActionRequest};

use super::WorkerContext;

/// What: Execute one store write.
///
/// Inputs:
/// - `ctx`: Store and identity handles.
/// - `req`: The action.
///
/// Output:
/// - The matching [`ActionOutcome`]; store errors become messages.
///
/// Details:
/// - Every action resolves the session origin first (cached after the first call).
pub async fn perform(ctx: &WorkerContext, req: ActionRequest) -> ActionOutcome {
    let origin = ctx.identity.resolve().await;
    let store = ctx.store.as_ref();
    match req {
        ActionRequest::Submit { keyword, text } => {
            let result = sources::insert_comment(store, keyword, &text, &origin).await;
            match &result {
                Ok(c) => tracing::info!(keyword, comment = c.id, "comment submitted"),
                Err(e) => tracing::warn!(keyword, error = %e, "comment submission failed"),
            }
            ActionOutcome::Submitted {
                keyword,
                result: result.map_err(|e| e.to_string()),
            }
        }
        ActionRequest::Like { comment } => {
            let result = sources::like_comment(store, comment, &origin).await;
            match &result {
                Ok(outcome) => tracing::info!(comment, ?outcome, "like processed"),
                Err(e) => tracing::warn!(comment, error = %e, "like failed"),
            }
            ActionOutcome::Liked {
                comment,
                origin,
                result: result.map_err(|e| e.to_string()),
            }
        }
        ActionRequest::Delete { comment } => {
            let result = sources::delete_comment(store, comment, &origin).await;
            match &result {
                Ok(removed) => tracing::info!(comment, removed, "delete processed"),
                Err(e) => tracing::warn!(comment, error = %e, "delete failed"),
            }
            ActionOutcome::Deleted {
                comment,
                result: result.map_err(|e| e.to_string()),
            }
        }
    }
}

/// What: Spawn the action worker; each request runs in its own task.
pub fn spawn_action_worker(
    ctx: WorkerContext,
    mut req_rx: mpsc::UnboundedReceiver<ActionRequest>,
    res_tx: mpsc::UnboundedSender<ActionOutcome>,
) {
    tokio::spawn(async move {
        while let Some(req) = req_rx.recv().await {
            let ctx = ctx.clone();
            let res_tx = res_tx.clone();
            tokio::spawn(async move {
                let _ = res_tx.send(perform(&ctx, req).await);
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sources::IdentityResolver;
    use crate::state::LikeOutcome;
    use crate::store::demo_store;

    #[tokio::test]
    /// What: Submissions carry the resolved origin; a second like is reported as duplicate.
    ///
    /// Inputs:
    /// - Demo store, fixed origin, one submit and two likes of the new comment.
    ///
    /// Output:
    /// - Stored comment owned by the origin; likes yield `Liked { 1 }` then `AlreadyLiked`.
    async fn submit_then_like_twice() {
        let store = Arc::new(demo_store());
        let ctx = WorkerContext::new(store.clone(), IdentityResolver::fixed("10.0.0.9"));
        let ActionOutcome::Submitted { result, .. } = perform(
            &ctx,
            ActionRequest::Submit {
                keyword: 1,
                text: "hello".into(),
            },
        )
        .await
        else {
            panic!("expected submit outcome");
        };
        let comment = result.expect("stored");
        assert_eq!(comment.origin, "10.0.0.9");
        assert_eq!(comment.likes, 0);

        let first = perform(&ctx, ActionRequest::Like { comment: comment.id }).await;
        assert!(matches!(
            first,
            ActionOutcome::Liked { result: Ok(LikeOutcome::Liked { likes: 1 }), .. }
        ));
        let second = perform(&ctx, ActionRequest::Like { comment: comment.id }).await;
        assert!(matches!(
            second,
            ActionOutcome::Liked { result: Ok(LikeOutcome::AlreadyLiked), .. }
        ));
    }

    #[tokio::test]
    /// What: Store failures surface as error messages.
    async fn failures_become_messages() {
        let store = Arc::new(demo_store());
        store.fail_table("comment");
        let ctx = WorkerContext::new(store, IdentityResolver::fixed("10.0.0.9"));
        let out = perform(&ctx, ActionRequest::Delete { comment: 1 }).await;
        assert!(matches!(out, ActionOutcome::Deleted { result: Err(_), .. }));
    }
}
