use std::fs::{self, File};
use std::path::PathBuf;

use env_logger::{Env, Target, WriteStyle};

/// Environment variable holding the log filter, e.g. `BAGELS_LOG=debug`.
pub const LOG_ENV_VAR: &str = "BAGELS_LOG";

// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// A timestamped file, so a full-screen UI is never drawn over
    File,
}

/// Directory for log files: `<data_local_dir>/bagels-with-words/logs`.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("bagels-with-words")
        .join("logs")
}

fn log_file_name() -> String {
    format!(
        "bagels-{}-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S"),
        std::process::id()
    )
}

/// Initialize `env_logger` with the filter from `BAGELS_LOG` (default `warn`).
///
/// Returns the log file path when logging to a file.
pub fn init_logging(target: LogTarget) -> Option<PathBuf> {
    let mut builder = env_logger::Builder::from_env(Env::new().filter_or(LOG_ENV_VAR, "warn"));

    let path = match target {
        LogTarget::Stderr => None,
        LogTarget::File => {
            let dir = log_dir();
            let path = dir.join(log_file_name());
            match fs::create_dir_all(&dir).and_then(|()| File::create(&path)) {
                Ok(file) => {
                    builder
                        .target(Target::Pipe(Box::new(file)))
                        .write_style(WriteStyle::Never);
                    Some(path)
                }
                Err(e) => {
                    eprintln!("Warning: Failed to create log file {}: {e}", path.display());
                    // Logging to stderr would corrupt the screen
                    builder.filter_level(log::LevelFilter::Off);
                    None
                }
            }
        }
    };

    let _ = builder.try_init();
    path
}
