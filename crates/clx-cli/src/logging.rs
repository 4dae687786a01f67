//! File-based logging setup.
//!
//! The TUI owns the terminal, so logs go to a daily-rotated file under the
//! app home instead of stderr. Filtering is controlled with `CLX_LOG`
//! (standard `tracing` env-filter syntax), defaulting to `info`.

use anyhow::{Context, Result};
use clx_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. The returned guard must stay alive
/// for the duration of the process so buffered log lines get flushed.
pub fn init() -> Result<WorkerGuard> {
    let logs_dir = paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("create logs directory at {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "clx.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("CLX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
