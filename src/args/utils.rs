//! Helpers turning parsed arguments into runtime inputs.

use crate::app::RunOptions;
use crate::args::Args;

/// What: Determine the log level from the parsed arguments.
///
/// Output:
/// - `"debug"` with `--verbose`, otherwise `--log-level` (default `info`).
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// Runtime options taken from the command line.
pub fn run_options(args: &Args) -> RunOptions {
    RunOptions {
        demo: args.demo,
        category: args.category,
        store_url: args
            .store_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    }
}
