use thiserror::Error;

use crate::WindowId;

/// Errors reported by host operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The window is no longer managed by the host (closed mid-gesture).
    #[error("window {0} is gone")]
    WindowGone(WindowId),

    /// The host does not support the requested operation on this window.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Any other backend failure, carried as text.
    #[error("host backend error: {0}")]
    Backend(String),
}

/// Result alias for host operations.
pub type Result<T> = std::result::Result<T, Error>;
