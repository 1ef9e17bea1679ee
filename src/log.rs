//! Log callback system.
//!
//! The library never writes to stdout or stderr on its own: the terminal is
//! usually in raw mode with the screen owned by the application. Diagnostics
//! go to a callback the application installs (typically forwarding into its
//! own logger or a file).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

static INSTALLED: AtomicBool = AtomicBool::new(false);

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback, replacing any previous one.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let mut guard = log_callback()
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = Some(Box::new(callback));
    INSTALLED.store(true, Ordering::Release);
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    let mut guard = log_callback()
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = None;
    INSTALLED.store(false, Ordering::Release);
}

/// Whether a callback is installed.
///
/// Callers check this before formatting a message so the hot decode loop
/// pays nothing when logging is off.
#[must_use]
pub fn log_enabled() -> bool {
    INSTALLED.load(Ordering::Acquire)
}

/// Emit a log message to the registered callback.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}
