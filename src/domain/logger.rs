//! Debug logging to a daily-rotated file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use time::macros::format_description;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Prefix of every log file name.
const LOG_PREFIX: &str = "bluetuith";

/// Initialize the logging system, writing to `log_dir`.
pub fn init(log_dir: &Path) -> Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    cleanup_old_logs(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_PREFIX);

    // Use local timezone for timestamps
    let time_format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let local_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = OffsetTime::new(local_offset, time_format);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(timer),
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

/// Remove log files older than two days.
pub fn cleanup_old_logs(log_dir: &Path) -> Result<()> {
    use std::time::{Duration, SystemTime};

    let cutoff = SystemTime::now() - Duration::from_secs(2 * 24 * 60 * 60);

    if !log_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let is_ours = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(LOG_PREFIX));
        if !is_ours {
            continue;
        }

        let modified = fs::metadata(&path).and_then(|m| m.modified());
        if matches!(modified, Ok(m) if m < cutoff) {
            let _ = fs::remove_file(&path);
        }
    }

    Ok(())
}
