//! File logging for the TUI session.
//!
//! The terminal belongs to the UI, so events go to `reprise.log` through a
//! non-blocking writer. The returned guard flushes it on drop.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{self, LogSettings};

pub const LOG_FILE: &str = "reprise.log";
pub const LOG_ENV: &str = "REPRISE_LOG";

fn build_filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns `None` (and runs without logs)
/// when no log directory can be used.
pub fn init(settings: &LogSettings) -> Option<WorkerGuard> {
    let dir = settings.dir.clone().or_else(config::default_log_dir)?;
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("reprise: cannot create log dir {}: {e}", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(settings))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init();
    if let Err(e) = installed {
        eprintln!("reprise: logging disabled: {e}");
        return None;
    }
    Some(guard)
}
