//! Error types for structured-nav library.

use std::io;
use thiserror::Error;

/// Result type alias for structured-nav operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building navigation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The per-instance nav block could not be parsed.
    #[error("Error parsing nav config: {0}")]
    Config(String),

    /// The persisted settings could not be read or written.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// Error during rendering (HTML, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}
