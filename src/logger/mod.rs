//! Structured console logging
//!
//! Leveled, tag-based logging with colored output. The minimum level is
//! read once from the `EXPLORER_LOG` environment variable (error, warning,
//! info, debug); the default is info. Errors are always shown.
//!
//! ## Usage
//!
//! ```rust
//! use ethexplorer::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Connection failed");
//! logger::warning(LogTag::Cache, "Serving stale data");
//! logger::info(LogTag::Server, "Listening on 127.0.0.1:8080");
//! logger::debug(LogTag::Nft, "Request details: ...");
//! ```

mod format;
mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

use once_cell::sync::OnceCell;

static MIN_LEVEL: OnceCell<LogLevel> = OnceCell::new();

/// Initialize the logger from the environment
///
/// Call once at startup, before any logging occurs. Safe to call again
/// (subsequent calls are no-ops).
pub fn init() {
    let level = std::env::var("EXPLORER_LOG")
        .ok()
        .and_then(|value| LogLevel::parse(&value))
        .unwrap_or(LogLevel::Info);
    let _ = MIN_LEVEL.set(level);
}

fn min_level() -> LogLevel {
    *MIN_LEVEL.get_or_init(|| LogLevel::Info)
}

fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    // Errors always log
    if level != LogLevel::Error && level > min_level() {
        return;
    }
    format::format_and_log(tag, level, message);
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
pub fn warning(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (diagnostic detail, off by default)
pub fn debug(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Debug, message);
}
