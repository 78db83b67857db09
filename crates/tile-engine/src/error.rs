use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the tiling engine.
///
/// Geometry operations never produce these: failed host calls inside a
/// gesture are logged and dropped. Errors only reach callers of the facade's
/// configuration and popup entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// A host capability call failed.
    #[error("Host error: {0}")]
    Host(#[from] tile_host::Error),

    /// Settings could not be loaded or edited.
    #[error("Settings error: {0}")]
    Config(#[from] config::Error),

    /// No action is bound to this name.
    #[error("Unknown binding: {0}")]
    UnknownBinding(String),

    /// A popup input arrived while no popup session is open.
    #[error("No popup session is open")]
    NoPopup,
}
