//! Scenario files: a usable area and the windows on the active workspace.

use std::{fs, path::Path};

use serde::Deserialize;
use tile_geom::Rect;
use tile_host::{MaxFlags, WindowState};

use crate::error::{Error, Result};

/// Maximize axes as written in a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Max {
    /// Not maximized.
    #[default]
    None,
    /// Full usable width.
    Horizontal,
    /// Full usable height.
    Vertical,
    /// Both axes.
    Both,
}

impl From<Max> for MaxFlags {
    fn from(value: Max) -> Self {
        match value {
            Max::None => Self::empty(),
            Max::Horizontal => Self::HORIZONTAL,
            Max::Vertical => Self::VERTICAL,
            Max::Both => Self::BOTH,
        }
    }
}

/// Helper for serde defaults.
const fn yes() -> bool {
    true
}

/// One simulated window.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowSpec {
    /// Label printed in the report.
    #[serde(default)]
    pub title: String,
    /// Floating frame; a maximized window is laid out from it.
    pub frame: Rect,
    /// Maximized axes at start.
    #[serde(default)]
    pub maximized: Max,
    /// Whether the window starts minimized.
    #[serde(default)]
    pub minimized: bool,
    /// Whether the window can be resized.
    #[serde(default = "yes")]
    pub resizeable: bool,
    /// Whether the window can be maximized.
    #[serde(default = "yes")]
    pub can_maximize: bool,
    /// Whether the window can be minimized.
    #[serde(default = "yes")]
    pub can_minimize: bool,
}

impl WindowSpec {
    /// Initial host state.
    pub fn state(&self) -> WindowState {
        WindowState {
            frame: self.frame,
            maximized: self.maximized.into(),
            minimized: self.minimized,
            resizeable: self.resizeable,
            can_maximize: self.can_maximize,
            can_minimize: self.can_minimize,
        }
    }
}

/// A whole simulated desktop.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Usable work area of the single monitor.
    pub area: Rect,
    /// Windows in switcher order.
    pub windows: Vec<WindowSpec>,
    /// Index of the focused window; the first window when omitted.
    #[serde(default)]
    pub focus: Option<usize>,
}

impl Scenario {
    /// Parse scenario RON text.
    pub fn from_ron(src: &str, path: &Path) -> Result<Self> {
        let scenario: Self = ron::from_str(src).map_err(|e| Error::Scenario {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(i) = scenario.focus.filter(|i| *i >= scenario.windows.len()) {
            return Err(Error::Other(format!(
                "focus index {i} out of range ({} windows)",
                scenario.windows.len()
            )));
        }
        Ok(scenario)
    }

    /// Read and parse a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path)?;
        Self::from_ron(&src, path)
    }
}
