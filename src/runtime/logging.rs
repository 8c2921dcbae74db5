use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Install the global tracing subscriber, writing to the configured log
/// file. The terminal is owned by the TUI, so nothing goes to stdout.
pub fn init(log: &LogSettings) {
    let file = match OpenOptions::new().create(true).append(true).open(&log.file) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("segue: cannot open log file {}: {e}", log.file.display());
            return;
        }
    };

    let filter =
        EnvFilter::try_new(&log.level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}
