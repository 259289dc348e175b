use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

pub const LOG_FILE_NAME: &str = "bootstrap.log";

/// Flushes the log file when dropped; hold it until the run is over.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Where this run appends its log, if file logging is on.
pub fn log_file_path(config: &Config) -> Option<PathBuf> {
    config
        .enable_file_logs
        .then(|| config.log_dir.join(LOG_FILE_NAME))
}

/// Installs the global subscriber: stdout always, plus the log file when
/// `ENABLE_FILE_LOGS` is set. Each run appends to the same file.
pub fn init_tracing(config: &Config) -> Option<FileLogGuard> {
    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false));

    let Some(path) = log_file_path(config) else {
        registry.init();
        return None;
    };

    if let Err(err) = std::fs::create_dir_all(&config.log_dir) {
        registry.init();
        tracing::warn!(dir = %config.log_dir.display(), error = %err, "File logging disabled");
        return None;
    }

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&config.log_dir, LOG_FILE_NAME));
    registry
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::debug!(path = %path.display(), "Writing logs to file");
    Some(FileLogGuard { _guard: guard })
}
