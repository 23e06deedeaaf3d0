//! Logging Infrastructure
//!
//! Structured logging on stderr (stdout carries command output), plus an
//! optional daily rotating file log.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, prelude::*};

/// File name prefix of rotated logs (`flag-engine.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "flag-engine";

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - JSON lines instead of the human-readable format
/// * `log_dir` - Optional directory for daily rotating file logs
///
/// # Examples
/// ```no_run
/// use flag_engine::utils::logger::init_logger_with_file;
///
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed()
    };
    layers.push(console_layer);

    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)?;

        // Daily rotating appender, removed by `cleanup_old_logs`
        let app_log = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        let file_layer = if json_format {
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log))
                .boxed()
        };
        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Delete rotated log files dated more than `retention_days` before `today`
///
/// Returns the number of deleted files. Files not named
/// `flag-engine.YYYY-MM-DD` are left alone.
pub fn cleanup_old_logs(
    log_dir: &Path,
    retention_days: i64,
    today: NaiveDate,
) -> anyhow::Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let cutoff = today - chrono::Duration::days(retention_days);
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(date_part) = name
            .strip_prefix(LOG_FILE_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            && let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            removed += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(removed)
}
