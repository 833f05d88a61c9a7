//! Append-only file log.
//!
//! Charts take over the terminal, so diagnostics go to a per-run file under
//! the user's cache directory and never to stdout or stderr.

use std::fmt;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::panic::PanicInfo;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;

use crate::constants::APP_NAME;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Info,
    Debug,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Error => "ERROR",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        })
    }
}

/// `<cache dir>/issue-lens/logs`, or the temp dir when there is no cache dir.
pub fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
        .join("logs")
}

pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_in(&default_log_dir())?;
    Ok(())
}

/// Start a fresh log file in `dir` and route every later message to it.
pub fn init_logging_in(dir: &Path) -> std::io::Result<PathBuf> {
    create_dir_all(dir)?;
    let log_file = dir.join(format!(
        "{}-{}.log",
        APP_NAME,
        Local::now().format("%Y%m%d-%H%M%S")
    ));

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(log_file.clone());
    }
    log_info(&format!("Logging initialized to: {}", log_file.display()));
    Ok(log_file)
}

pub fn log_error(message: &str) {
    write_entry(Level::Error, message);
}

pub fn log_info(message: &str) {
    write_entry(Level::Info, message);
}

pub fn log_debug(message: &str) {
    write_entry(Level::Debug, message);
}

/// Record where and why we panicked, plus a backtrace at debug level.
pub fn log_panic_info(info: &PanicInfo) {
    let location = info
        .location()
        .map(|l| format!("at {}:{}:{} - ", l.file(), l.line(), l.column()))
        .unwrap_or_default();
    let payload = info
        .payload()
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Unknown panic payload".to_string());

    log_error(&format!("PANIC: {}{}", location, payload));
    log_debug(&format!("Backtrace:\n{}", std::backtrace::Backtrace::capture()));
}

pub fn format_entry(level: Level, message: &str) -> String {
    format!(
        "[{}] {} - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        message
    )
}

// Silently drops the entry before init or when the file cannot be opened.
fn write_entry(level: Level, message: &str) {
    let Ok(guard) = LOG_FILE.lock() else {
        return;
    };
    let Some(path) = guard.as_ref() else {
        return;
    };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", format_entry(level, message));
    }
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_carries_level_and_message() {
        let entry = format_entry(Level::Debug, "loaded 3 issues");
        assert!(entry.starts_with('['));
        assert!(entry.ends_with("] DEBUG - loaded 3 issues"));
    }

    #[test]
    fn messages_land_in_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_logging_in(dir.path()).unwrap();
        assert_eq!(get_log_file_path(), Some(path.clone()));

        log_error("something broke");
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO - Logging initialized to:"));
        assert!(contents.contains("ERROR - something broke"));
    }
}
