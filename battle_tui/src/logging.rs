//! File logging for the TUI
//!
//! The terminal belongs to ratatui, so tracing output goes to a file.
//! `RUST_LOG` overrides the default filter.

use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "battle_tui.log";
const DEFAULT_FILTER: &str = "battle_core=info,battle_tui=info";

/// Install the global subscriber writing to `<dir>/battle_tui.log`
///
/// Keep the returned guard alive until exit; dropping it flushes buffered lines.
pub fn init(dir: &Path) -> io::Result<WorkerGuard> {
    let (writer, guard) = file_writer(dir)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    tracing::info!(log = %dir.join(LOG_FILE).display(), "logging initialized");
    Ok(guard)
}

fn file_writer(dir: &Path) -> io::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    Ok(tracing_appender::non_blocking(appender))
}
