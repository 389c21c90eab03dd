//! Log file setup. The terminal is owned by the UI, so logs go to a file.

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use squall_config::LogLevel;

/// Install the global subscriber writing to the platform log file.
///
/// Returns the log path, or `None` when no data directory is available.
pub fn init(level: LogLevel) -> color_eyre::Result<Option<PathBuf>> {
    let Some(path) = squall_config::log_path() else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(Some(path))
}
