//! Logging Config
//!
//! Planner logs are written to stderr; stdout only carries the itinerary and summary.

use clap::Args;

/// How log lines are rendered on stderr.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// One short line per event, with source location.
    Compact,

    /// One JSON object per event, for piping into log tooling.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Minimum level or filter directive, e.g. `trailhead=debug`
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log line format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
