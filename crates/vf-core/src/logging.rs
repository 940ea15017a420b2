//! Structured logging foundation for vf-core.
//!
//! Dual-mode logging on stderr: human-readable console output for
//! interactive use, JSON lines for agent workflows. stdout stays reserved
//! for command payloads, so piping `vf-core analyze | jq` never mixes logs
//! into the response.
//!
//! The filter honors the `VF_LOG` environment variable (`tracing`
//! `EnvFilter` syntax) and defaults to `info`.

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable controlling the log filter.
pub const LOG_ENV_VAR: &str = "VF_LOG";

/// Log output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact human console lines; color when stderr is a terminal.
    #[default]
    Human,
    /// One JSON object per event.
    Json,
}

/// Logging configuration resolved from CLI flags and environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Raise the filter floor to `debug` regardless of `VF_LOG`.
    pub verbose: bool,
}

/// Install the global subscriber. Safe to call once per process; later
/// calls are ignored so tests can race it.
pub fn init_logging(config: &LogConfig) {
    let default_filter = if config.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Human => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            )
            .try_init(),
    };
    // A second init (e.g. from tests) keeps the first subscriber.
    drop(result);
}
