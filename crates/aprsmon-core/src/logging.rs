//! File logging for the monitor
//!
//! The dashboard draws on stdout and headless mode writes NDJSON there, so
//! diagnostics go to a daily file under
//! `<data_local_dir>/aprs-monitor/logs/aprsmon.log`.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV_VAR: &str = "APRSMON_LOG";

const LOG_FILE_NAME: &str = "aprsmon.log";

/// Workspace crates logged at `info` when no filter is set.
const WORKSPACE_TARGETS: &[&str] = &[
    "aprs_monitor",
    "aprsmon_core",
    "aprsmon_channel",
    "aprsmon_app",
    "aprsmon_tui",
];

/// Directive used when `APRSMON_LOG` is unset or invalid. HTTP and
/// WebSocket internals stay at `warn`.
pub fn default_filter() -> String {
    let mut directives: Vec<String> = WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}=info"))
        .collect();
    directives.push("warn".to_string());
    directives.join(",")
}

/// Install the global subscriber writing to the rolling log file.
///
/// ```bash
/// APRSMON_LOG=debug aprsmon
/// APRSMON_LOG=aprsmon_channel=trace,aprsmon_app=debug aprsmon --headless
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_filter()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_dir = %log_dir.display(),
        "aprsmon session started"
    );

    Ok(())
}

fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aprs-monitor")
        .join("logs")
}

/// Base path of the rolling log file. The appender adds a date suffix.
pub fn log_file_path() -> PathBuf {
    log_directory().join(LOG_FILE_NAME)
}
