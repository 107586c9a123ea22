use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

fn open_log_file(log_file: &Path) -> std::io::Result<File> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(log_file)
}

/// Installs stderr logging plus a per-run file log that is truncated on
/// every start. Falls back to stderr only when the file cannot be opened.
pub fn init(log_file: &Path) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, file_error) = match open_log_file(log_file) {
        Ok(file) => (
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            ),
            None,
        ),
        Err(err) => (None, Some(err)),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    match file_error {
        Some(err) => tracing::warn!(
            ?err,
            path = %log_file.display(),
            "file logging unavailable; using stderr only"
        ),
        None => tracing::debug!(path = %log_file.display(), "file logging enabled"),
    }
}
