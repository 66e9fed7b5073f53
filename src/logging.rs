//! Logging setup.
//!
//! Every run logs to two places:
//!
//! - stdout, for the operator watching the run
//! - an append-only file named by the run's calendar date
//!   (`<log-dir>/rentmap-YYYY-MM-DD.log`), for post-hoc debugging
//!
//! The filter defaults to `info` and can be overridden with `RUST_LOG`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;

/// Initialize tracing for a run dated `run_date`.
///
/// Returns the path of the log file that was opened.
pub fn init(log_dir: &Path, run_date: NaiveDate) -> Result<std::path::PathBuf, AppError> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create log dir '{}': {e}", log_dir.display()),
        )
    })?;

    let log_path = log_dir.join(format!("rentmap-{}.log", run_date.format("%Y-%m-%d")));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| {
            AppError::new(
                2,
                format!("Failed to open log file '{}': {e}", log_path.display()),
            )
        })?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .init();

    Ok(log_path)
}
