// src/logging.rs

//! Logging setup for the `jobdag` binary.
//!
//! The filter is picked in this order:
//! 1. `--log-level`, applied to every target;
//! 2. `JOBDAG_LOG`, read as `EnvFilter` directives (`debug`,
//!    `jobdag::engine=trace,info`, ...);
//! 3. `info`.
//!
//! Output goes to stderr; stdout carries the run summary, the dry-run plan
//! and the DOT graph.

use anyhow::{Result, anyhow};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "JOBDAG_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}

/// Filter for the given CLI level and `JOBDAG_LOG` value.
///
/// Unparsable directives fall back to `info` instead of failing startup.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::builder()
            .with_default_directive(level_filter(level).into())
            .parse_lossy("");
    }

    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| {
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .parse_lossy("")
        })
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}
