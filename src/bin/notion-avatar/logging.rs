//! Logging setup using `tracing-subscriber`.
//!
//! Logs go to stderr so stdout stays clean for command output. `RUST_LOG`
//! overrides the level chosen by `-v`.

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogFormatArg;

/// Maps a `-v` count to a level: info, debug, trace.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,notion_avatar={level}")))
}

/// Installs the global subscriber. Call once at startup.
pub fn init_logging(level: Level, format: LogFormatArg) {
    let filter = build_env_filter(level);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormatArg::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormatArg::Compact => registry
            .with(fmt::layer().compact().without_time().with_writer(io::stderr))
            .init(),
        LogFormatArg::Pretty => registry
            .with(fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_from_verbosity(0), Level::INFO);
        assert_eq!(level_from_verbosity(1), Level::DEBUG);
        assert_eq!(level_from_verbosity(5), Level::TRACE);
    }
}
