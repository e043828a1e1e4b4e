mod bootstrap;
mod buffer;
mod config;
mod dispatch;
mod error;
mod logging;
mod matcher;
mod mode;
mod render;
mod session;

use std::{env, error::Error, io, process};

use bootstrap::Announce;
use matcher::EmptyDatabase;

type AppResult<T> = Result<T, Box<dyn Error>>;

fn main() {
    if let Err(usage) = check_args(env::args()) {
        eprintln!("{usage}");
        process::exit(1);
    }

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// The program takes no arguments; anything extra yields the usage line.
fn check_args(mut args: impl Iterator<Item = String>) -> Result<(), String> {
    let program = args.next().unwrap_or_else(|| "tty-cheatsheet".to_string());
    match args.next() {
        Some(_) => Err(format!("Usage: {program}")),
        None => Ok(()),
    }
}

fn run() -> AppResult<()> {
    let config = config::load()?;
    let _log_guard = logging::init(config.log_level.as_deref(), &config.log_dir)?;

    let announce = Announce {
        enabled: config.announce,
        ..Announce::default()
    };
    let outcome =
        bootstrap::ensure_database(&config.database, announce, &mut io::stdout().lock())?;
    tracing::debug!(?outcome, path = %config.database.display(), "database ready");

    session::ensure_tty_stdin()?;
    session::run(&config, &EmptyDatabase)
}
