//! File logging.
//!
//! The terminal belongs to the UI for the whole session, so events only ever
//! go to `<log_dir>/tty-cheatsheet.log`. Logging stays off unless a level is
//! configured or `RUST_LOG` is set.

use std::{env, fs, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::SetupError;

pub const LOG_FILE: &str = "tty-cheatsheet.log";

/// Returns the appender guard; dropping it flushes and stops the writer.
pub fn init(level: Option<&str>, log_dir: &Path) -> Result<Option<WorkerGuard>, SetupError> {
    let Some(filter) = build_filter(level, env::var("RUST_LOG").ok().as_deref())? else {
        return Ok(None);
    };

    fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| SetupError::Logging(err.to_string()))?;

    tracing::info!(dir = %log_dir.display(), "logging started");
    Ok(Some(guard))
}

fn build_filter(
    level: Option<&str>,
    rust_log: Option<&str>,
) -> Result<Option<EnvFilter>, SetupError> {
    let directives = match (rust_log, level) {
        (Some(env), _) if !env.trim().is_empty() => env,
        (_, Some(level)) => level,
        _ => return Ok(None),
    };
    EnvFilter::try_new(directives)
        .map(Some)
        .map_err(|err| SetupError::Logging(format!("invalid filter {directives:?}: {err}")))
}
