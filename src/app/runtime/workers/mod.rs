//! Background workers. Each owns its receiving channel and reports back to the
//! event loop; none of them touches `AppState`.

use std::sync::Arc;

use crate::sources::IdentityResolver;
use crate::store::RecordStore;

/// Store writes: submit, like, delete.
pub mod actions;
/// Tick worker and terminal event thread.
pub mod auxiliary;
/// Keyword detail and sentiment fetches.
pub mod detail;
/// Periodic keyword/comment polls plus one-shot start-up loads.
pub mod sync;

/// Shared handles every worker needs.
#[derive(Clone)]
pub struct WorkerContext {
    /// Record store backend.
    pub store: Arc<dyn RecordStore>,
    /// Session origin resolver.
    pub identity: Arc<IdentityResolver>,
}

impl WorkerContext {
    /// Bundle a store and an identity resolver.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, identity: IdentityResolver) -> Self {
        Self {
            store,
            identity: Arc::new(identity),
        }
    }
}
