//! Settings store for kptile: two behavior flags plus one accelerator per
//! keypad action, loaded from a RON file.
#![allow(missing_docs)]

use std::{
    env,
    path::{Path, PathBuf},
};

mod accel;
mod defaults;
mod error;
mod loader;
mod raw;
mod settings;

#[cfg(test)]
mod test_parse;

pub use accel::{Accelerator, Modifiers};
pub use defaults::{ALL_KEYBINDINGS, COMPLETION_KEYBINDINGS, TILING_KEYBINDINGS};
pub use error::{Error, excerpt_at};
pub use loader::{load_from_path, load_from_str};
pub use settings::Settings;

/// Determine the preferred user settings path (`~/.config/kptile/settings.ron`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".config");
    p.push("kptile");
    p.push("settings.ron");
    p
}

/// Resolve the effective settings path.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use `~/.config/kptile/settings.ron` when it exists.
/// 3) Else `None`: the caller runs with [`Settings::default`].
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let preferred = default_config_path();
    preferred.exists().then_some(preferred)
}

/// Load settings from the resolved path, or defaults when there is none.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Settings, Error> {
    match resolve_config_path(explicit) {
        Some(path) => load_from_path(&path),
        None => Ok(Settings::default()),
    }
}
