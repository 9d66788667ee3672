//! Logging for the report server.
//!
//! Every record goes to the terminal (colored) and to `<log_dir>/pool-chem.log`.
//! Credentials never reach this layer: callers log lengths, not values.

use crate::error::ServerError;

use std::fs::{File, create_dir_all};
use std::io::stdout;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::{format_rfc3339_millis, format_rfc3339_seconds};
use log::{LevelFilter, info, warn};

/// Set once a dispatch has been installed as the global logger.
static LOGGER_INSTALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "pool-chem.log";

const ALREADY_INSTALLED_MESSAGE: &str = "Logger already installed; keeping the existing one";

/// Install the global logger.
///
/// The log directory is created if needed and the file is opened on every
/// call, so a bad directory is always reported. Only the first successful
/// call installs the global logger; later ones log a warning and return Ok.
///
/// # Errors
/// [`ServerError::Logger`] when the directory or file cannot be created, or
/// when another global logger was installed outside this module.
pub fn initialize(log_dir: &Path, level: LevelFilter) -> Result<(), ServerError> {
    let log_file = open_log_file(log_dir)?;

    if LOGGER_INSTALLED.swap(true, Ordering::SeqCst) {
        warn!("{ALREADY_INSTALLED_MESSAGE}");
        return Ok(());
    }

    if let Err(e) = install(log_file, level) {
        LOGGER_INSTALLED.store(false, Ordering::SeqCst);
        return Err(e);
    }

    info!("Logger initialized with level: {level:?}");
    info!("Log file: {}", log_dir.join(LOG_FILE_NAME).display());
    Ok(())
}

#[track_caller]
fn open_log_file(log_dir: &Path) -> Result<File, ServerError> {
    create_dir_all(log_dir).map_err(|e| {
        ServerError::logger(format!(
            "Failed to create log directory {}: {e}",
            log_dir.display()
        ))
    })?;

    fern::log_file(log_dir.join(LOG_FILE_NAME))
        .map_err(|e| ServerError::logger(format!("Failed to create log file: {e}")))
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .error(Red)
        .warn(Yellow)
        .info(Green)
        .debug(Blue)
        .trace(Magenta)
}

#[track_caller]
fn install(log_file: File, level: LevelFilter) -> Result<(), ServerError> {
    let colors = level_colors();

    // Terminal: `<time> <LEVEL> <target>: <message>`
    let console = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {}: {}",
                format_rfc3339_seconds(SystemTime::now()),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(stdout());

    // File: no colors, source position instead of target
    let file = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} [{}:{}] {}",
                format_rfc3339_millis(SystemTime::now()),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                message
            ))
        })
        .chain(log_file);

    Dispatch::new()
        .level(level)
        .level_for("hyper", LevelFilter::Warn.min(level))
        .level_for("hyper_util", LevelFilter::Warn.min(level))
        .level_for("reqwest", LevelFilter::Warn.min(level))
        .chain(console)
        .chain(file)
        .apply()
        .map_err(|e| ServerError::logger(format!("Global logger already set: {e}")))
}
