//! trendboard application module.
//!
//! The runtime (event loop, channels, workers, result handlers) lives in
//! `runtime`; terminal mode switching lives in `terminal`.

/// Runtime event loop and background workers.
pub mod runtime;
/// Terminal setup and restoration utilities.
mod terminal;

// Re-export the public entrypoint so callers keep using `app::run(...)`.
pub use runtime::{RunOptions, run};
