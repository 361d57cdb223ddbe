// src/logging.rs

//! Logging setup for `amplify-dash` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `AMPLIFY_LOG` environment variable, either a bare level ("debug") or
//!    full directives ("amplify_dash=debug,reqwest=warn")
//! 3. default to `info`
//!
//! Logs are sent to STDERR so that stdout carries only command output.

use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;
use crate::errors::{AmplifyError, Result};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "AMPLIFY_LOG";

/// Initialise global logging subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = resolve_filter(cli_level, std::env::var(LOG_ENV).ok());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AmplifyError::Other(anyhow::anyhow!("installing log subscriber: {e}")))
}

/// Pick the filter from the CLI level or the raw env value.
///
/// An env value that does not parse as a filter falls back to `info`.
pub fn resolve_filter(cli_level: Option<LogLevel>, env_value: Option<String>) -> EnvFilter {
    if let Some(lvl) = cli_level {
        return EnvFilter::new(directive(lvl));
    }
    env_value
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn directive(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
