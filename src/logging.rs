//! Logging setup

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Base name of the rolling log file
pub const LOG_FILE_NAME: &str = "flashdeck.log";

/// Default filter when `RUST_LOG` is unset
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "flashdeck=debug,tower_http=debug,info"
    } else {
        "info"
    }
}

/// Installs the global tracing subscriber
///
/// Logs go to stdout (plain or JSON lines) and, when `log_dir` is given and
/// can be created, to a daily rolling file inside it. The returned guard
/// flushes the file writer when dropped and must be held for the life of the
/// program.
pub fn init_logging(log_dir: Option<&Path>, debug: bool, json: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let stdout_layer = if json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };

    let (file_layer, guard) = match log_dir.filter(|dir| std::fs::create_dir_all(dir).is_ok()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false).with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
