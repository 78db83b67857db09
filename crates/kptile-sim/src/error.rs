//! Error handling for the kptile-sim crate.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Convenient result type for simulator operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running the simulator.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Settings parsing or resolution errors.
    #[error("Settings error: {0}")]
    Config(#[from] config::Error),
    /// Errors surfaced by the engine facade.
    #[error("Engine error: {0}")]
    Engine(#[from] tile_engine::Error),
    /// The scenario file could not be parsed.
    #[error("Scenario {path}: {message}")]
    Scenario {
        /// Scenario file.
        path: PathBuf,
        /// Parser message with location.
        message: String,
    },
    /// Generic error for unexpected conditions.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Render with the settings excerpt when one is available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Config(e) => e.pretty(),
            other => other.to_string(),
        }
    }
}
