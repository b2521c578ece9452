//! Tracing setup.
//!
//! Every run appends to `{logs_dir}/access-YYYYMMDD.log` through a
//! non-blocking writer. Outside production, events are also printed to
//! stdout and the default level is `debug` instead of `info`. `RUST_LOG`
//! overrides the default level.

use std::fs::{self, OpenOptions};
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::CliError;

/// Name of the log file for `date`.
pub(crate) fn log_file_name(date: NaiveDate) -> String {
    format!("access-{}.log", date.format("%Y%m%d"))
}

/// Default filter directives.
fn default_directives(production: bool) -> &'static str {
    if production {
        "info"
    } else {
        "debug,hyper=info,hyper_util=info"
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub(crate) fn init(logs_dir: &Path, production: bool) -> Result<WorkerGuard, CliError> {
    fs::create_dir_all(logs_dir)?;
    let path = logs_dir.join(log_file_name(Local::now().date_naive()));
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(production)));
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);
    let stdout_layer = (!production).then(fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))?;

    tracing::debug!(path = %path.display(), "Logging initialized");
    Ok(guard)
}
