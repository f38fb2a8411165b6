use directories::ProjectDirs;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, StudyError};

/// Tick rate for the event loop (100ms)
pub const TICK_RATE: Duration = Duration::from_millis(100);

/// Sessions shorter than this are discarded on stop
pub const MIN_SESSION_SECS: i64 = 5;

/// Overrides the platform data directory when set
pub const DATA_DIR_ENV: &str = "STUDYSTONE_DATA_DIR";

/// Set to `debug` for verbose logging
pub const LOG_LEVEL_ENV: &str = "STUDYSTONE_LOG";

/// Resolve (and create) the directory holding the database, log and exports.
///
/// `STUDYSTONE_DATA_DIR` wins if set, otherwise the platform data directory:
/// - Linux: `~/.local/share/studystone`
/// - macOS: `~/Library/Application Support/studystone`
/// - Windows: `C:\Users\<User>\AppData\Roaming\studystone`
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => ProjectDirs::from("", "", "studystone")
            .ok_or(StudyError::NoDataDirectory)?
            .data_dir()
            .to_path_buf(),
    };

    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

/// Get the path to the database file.
pub fn get_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("studystone.db"))
}

/// Get the path to the log file.
pub fn get_log_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("studystone.log"))
}

/// Get the path for an export written on the given date.
pub fn get_export_path(date: chrono::NaiveDate) -> Result<PathBuf> {
    Ok(get_data_dir()?.join(format!("studystone-export-{}.json", date.format("%Y-%m-%d"))))
}

fn log_level() -> LevelFilter {
    match std::env::var(LOG_LEVEL_ENV).as_deref() {
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        Ok("warn") => LevelFilter::Warn,
        _ => LevelFilter::Info,
    }
}

/// Route the `log` facade to the log file.
///
/// The terminal is owned by the TUI, so nothing is written to stdout/stderr.
pub fn init_logging() -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(get_log_path()?)?;

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .build();

    // The only failure is a logger already being installed; it keeps receiving records
    if let Err(e) = WriteLogger::init(log_level(), config, file) {
        log::warn!("file logger not installed: {}", e);
    }
    Ok(())
}
