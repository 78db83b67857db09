//! Parse and load user settings.

use std::{fs, path::Path};

use tracing::info;

use crate::{Error, Settings, error::excerpt_at, raw::RawSettings};

/// Load settings from a RON file at `path`.
pub fn load_from_path(path: &Path) -> Result<Settings, Error> {
    let src = fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let settings = load_from_str(&src, Some(path))?;
    info!(path = %path.display(), "settings loaded");
    Ok(settings)
}

/// Parse settings from RON source. `path` only annotates errors.
pub fn load_from_str(src: &str, path: Option<&Path>) -> Result<Settings, Error> {
    let raw: RawSettings = ron::from_str(src).map_err(|e| {
        let line = e.span.start.line.max(1);
        let col = e.span.start.col.max(1);
        Error::Parse {
            path: path.map(Path::to_path_buf),
            line,
            col,
            message: e.code.to_string(),
            excerpt: excerpt_at(src, line, col),
        }
    })?;
    Settings::from_raw(raw).map_err(|e| match path {
        Some(p) => e.with_path(p),
        None => e,
    })
}
