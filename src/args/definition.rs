//! Command-line argument definition.

use clap::Parser;

/// trendboard - live trending keywords with per-keyword sentiment and comments
#[derive(Parser, Debug)]
#[command(name = "trendboard")]
#[command(version)]
#[command(about = "Live trending keywords with per-keyword sentiment and comments", long_about = None)]
pub struct Args {
    /// Category shown first (1 google, 2 netflix, 3 naver, 4 daum, 5 youtube)
    #[arg(short, long)]
    pub category: Option<i64>,

    /// Run against a seeded in-memory store instead of the remote one
    #[arg(long)]
    pub demo: bool,

    /// Record store URL, overriding settings.conf
    #[arg(long)]
    pub store_url: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}
