use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Anything that stops the program before the editor starts.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("HOME is not set")]
    HomeNotSet,

    #[error("Failed to load config: {0}")]
    Config(Box<figment::Error>),

    #[error("editor.capacity must be at least 1")]
    InvalidCapacity,

    #[error("Database path {} exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Could not create database directory {}: {source}", path.display())]
    CreateDatabase {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to start logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<figment::Error> for SetupError {
    fn from(err: figment::Error) -> Self {
        SetupError::Config(Box::new(err))
    }
}
