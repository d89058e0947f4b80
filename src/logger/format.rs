//! Log formatting and console output with ANSI colors

use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;

/// Width reserved for the tag column so messages stay aligned
const TAG_WIDTH: usize = 7;

/// Format and print a log message to stdout
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();

    let tag_str = format!("{:<width$}", tag.as_str(), width = TAG_WIDTH);
    let tag_str = match tag {
        LogTag::Server => tag_str.cyan(),
        LogTag::Api => tag_str.blue(),
        LogTag::Cache => tag_str.magenta(),
        LogTag::Nft => tag_str.green(),
        LogTag::Image => tag_str.yellow(),
    };

    let level_str = match level {
        LogLevel::Error => level.as_str().red().bold(),
        LogLevel::Warning => level.as_str().yellow(),
        LogLevel::Info => level.as_str().green(),
        LogLevel::Debug => level.as_str().dimmed(),
    };

    println!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        tag_str,
        level_str,
        message
    );
}
