//! Console and log-file output for omni.
//!
//! Console messages go to stderr so that command reports on stdout stay clean.
//! Every message is also appended to `omni.log`, tagged with the subcommand that
//! produced it:
//!
//! ```text
//! [2026-01-05 10:12:01] [dedup] INFO Dry run: project file left unchanged
//! ```

use colored::Colorize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const LOG_FILE_NAME: &str = "omni.log";
const DEFAULT_COMMAND: &str = "omni";

static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
static VERBOSITY: Mutex<u8> = Mutex::new(0);
static COMMAND: Mutex<Option<String>> = Mutex::new(None);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Error,
    Warn,
    Success,
    Info,
    Debug,
    Step,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Success => "SUCCESS",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Step => "STEP",
        }
    }

    /// Lowest verbosity at which the message reaches the console
    fn console_verbosity(self) -> u8 {
        match self {
            Level::Error | Level::Warn | Level::Success => 0,
            Level::Info | Level::Debug => 1,
            Level::Step => 2,
        }
    }

    fn console_line(self, message: &str) -> String {
        match self {
            Level::Error => format!("{} {}", "Error:".red().bold(), message),
            Level::Warn => format!("{} {}", "warning:".yellow().bold(), message),
            Level::Success => format!("{} {}", "\u{2714}".green().bold(), message),
            Level::Info => message.to_string(),
            Level::Debug => format!("{} {}", "DEBUG:".blue().bold(), message),
            Level::Step => format!("TRACE: {}", message),
        }
    }
}

/// Get the current verbosity level
pub fn get_verbosity() -> u8 {
    VERBOSITY.lock().ok().map(|v| *v).unwrap_or(0)
}

fn set_verbosity(verbosity: u8) {
    if let Ok(mut v) = VERBOSITY.lock() {
        *v = verbosity;
    }
}

/// Tag subsequent log-file lines with the running subcommand
pub fn set_command(name: &str) {
    if let Ok(mut command) = COMMAND.lock() {
        *command = Some(name.to_string());
    }
}

fn command_tag() -> String {
    COMMAND
        .lock()
        .ok()
        .and_then(|guard| guard.clone())
        .unwrap_or_else(|| DEFAULT_COMMAND.to_string())
}

/// Initialize the logger with a verbosity level, logging to `~/.config/omni/omni.log`
/// 0 = warn only, 1 = debug (-v), 2 = trace (-vv)
pub fn init_with_verbosity(verbosity: u8) -> Result<(), String> {
    set_verbosity(verbosity);
    let config_dir = get_config_dir()?;
    init_in_dir(&config_dir)
}

/// Initialize the logger with the log file placed in `log_dir`.
///
/// The previous run's log is discarded.
pub fn init_in_dir(log_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(log_dir).map_err(|e| format!("Failed to create log directory: {}", e))?;

    let log_file = log_dir.join(LOG_FILE_NAME);
    if log_file.exists() {
        let _ = fs::remove_file(&log_file);
    }

    let mut log_file_guard = LOG_FILE
        .lock()
        .map_err(|_| "Log file lock poisoned".to_string())?;
    *log_file_guard = Some(log_file);

    Ok(())
}

fn get_config_dir() -> Result<PathBuf, String> {
    #[cfg(not(target_os = "windows"))]
    let config_dir = dirs::home_dir()
        .ok_or("Could not determine home directory")?
        .join(".config")
        .join("omni");

    #[cfg(target_os = "windows")]
    let config_dir = dirs::config_dir()
        .ok_or("Could not determine config directory")?
        .join("omni");

    Ok(config_dir)
}

fn log_line(level: Level, message: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "[{}] [{}] {} {}",
        timestamp,
        command_tag(),
        level.tag(),
        message
    )
}

fn emit(level: Level, message: &str) {
    if let Some(log_path) = get_log_path() {
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_path) {
            let _ = writeln!(file, "{}", log_line(level, message));
        }
    }
    if get_verbosity() >= level.console_verbosity() {
        eprintln!("{}", level.console_line(message));
    }
}

pub fn info(message: &str) {
    emit(Level::Info, message);
}

pub fn debug(message: &str) {
    emit(Level::Debug, message);
}

pub fn warn(message: &str) {
    emit(Level::Warn, message);
}

pub fn error(message: &str) {
    emit(Level::Error, message);
}

pub fn success(message: &str) {
    emit(Level::Success, message);
}

/// Record a step; echoed to the console only at trace level
pub fn step(message: &str) {
    emit(Level::Step, message);
}

pub fn get_log_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}

/// Print the log file path to the user
pub fn show_log_path() {
    if let Some(path) = get_log_path() {
        eprintln!("Log file: {}", path.display());
    } else if let Ok(config_dir) = get_config_dir() {
        eprintln!("Log file: {}", config_dir.join(LOG_FILE_NAME).display());
    } else {
        eprintln!("Log file location not available");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_console_thresholds() {
        assert_eq!(Level::Error.console_verbosity(), 0);
        assert_eq!(Level::Success.console_verbosity(), 0);
        assert_eq!(Level::Debug.console_verbosity(), 1);
        assert_eq!(Level::Step.console_verbosity(), 2);
        assert_eq!(Level::Step.console_line("scan"), "TRACE: scan");
    }

    // Global log file and command tag are shared, so these checks run as one test.
    #[test]
    fn test_log_file_lifecycle() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let log_path = temp_dir.path().join(LOG_FILE_NAME);
        assert!(fs::write(&log_path, "stale line\n").is_ok());

        assert!(init_in_dir(temp_dir.path()).is_ok());
        assert_eq!(get_log_path(), Some(log_path.clone()));

        step("first step");
        set_command("dedup");
        warn("careful");

        let contents = fs::read_to_string(&log_path).unwrap_or_default();
        assert!(!contents.contains("stale line"));
        assert!(contents.contains("[omni] STEP first step"));
        assert!(contents.contains("[dedup] WARN careful"));
    }
}
