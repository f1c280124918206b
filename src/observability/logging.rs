use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "cocktail_etl.log";

/// Open the daily-rotated log file under `dir`, creating the directory if needed.
///
/// Returns the reason as a string when the directory or file cannot be created.
pub fn open_log_appender(dir: &Path) -> Result<RollingFileAppender, String> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("cannot create log directory {}: {}", dir.display(), e))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(dir)
        .map_err(|e| format!("cannot open log file in {}: {}", dir.display(), e))
}

/// Initializes the logging system with console output and, when the `logs`
/// directory is writable, a JSON file layer.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the whole run.
pub fn init_logging() -> Option<WorkerGuard> {
    let (file_layer, guard, file_error) = match open_log_appender(Path::new(LOG_DIR)) {
        Ok(appender) => {
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(non_blocking_writer);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    // Console output goes to stderr so stdout stays free for the run summary
    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    // Respect RUST_LOG if set; otherwise info for our crate, warnings elsewhere
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cocktail_etl=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("File logging disabled, {}", e);
    }

    guard
}
