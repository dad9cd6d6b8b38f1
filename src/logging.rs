use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{AppError, Result};

/// File name prefix of the rolling log; the appender adds `.YYYY-MM-DD`.
pub const LOG_FILE_PREFIX: &str = "nxfb.log";

/// Install the global subscriber. Call once near the start of `main`.
///
/// Events go to a daily rolling file under `log_dir` only, the terminal is
/// owned by the UI. `RUST_LOG` takes precedence over `default_level`.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(log_dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .map_err(|e| AppError::Config(format!("cannot create {}: {}", log_dir.display(), e)))?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));
    let filter = build_filter(default_level)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|e| AppError::Config(format!("logger already installed: {}", e)))?;

    Ok(guard)
}

fn build_filter(default_level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default_level)
        .map_err(|e| AppError::Config(format!("invalid log level {:?}: {}", default_level, e)))
}
