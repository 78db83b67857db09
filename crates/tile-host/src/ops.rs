use std::time::Duration;

use config::Accelerator;
use tile_geom::Rect;

use crate::{MaxFlags, Result, WindowId, WindowState};

/// Window and workspace operations supplied by the compositor.
///
/// Reads return `None` for windows the host no longer manages; mutating calls
/// report [`crate::Error::WindowGone`] in that case.
pub trait WindowHost: Send + Sync {
    /// The window holding keyboard focus, if any.
    fn focus_window(&self) -> Option<WindowId>;
    /// Windows on the active workspace, in switcher order.
    fn workspace_windows(&self) -> Vec<WindowId>;
    /// Current frame, maximize state and capabilities of `id`.
    fn window_state(&self, id: WindowId) -> Option<WindowState>;
    /// Usable work area of the monitor `id` currently sits on.
    fn work_area(&self, id: WindowId) -> Option<Rect>;

    /// Maximize `flags` axes; others keep their current state.
    fn maximize(&self, id: WindowId, flags: MaxFlags) -> Result<()>;
    /// Unmaximize `flags` axes, restoring the saved floating extent.
    fn unmaximize(&self, id: WindowId, flags: MaxFlags) -> Result<()>;
    /// Minimize (iconify) `id`.
    fn minimize(&self, id: WindowId) -> Result<()>;
    /// Move the frame origin without resizing.
    fn move_frame(&self, id: WindowId, x: i32, y: i32) -> Result<()>;
    /// Move and resize the frame in one call.
    fn move_resize_frame(&self, id: WindowId, rect: Rect) -> Result<()>;
    /// Raise and focus `id` using `timestamp` for activation ordering.
    fn activate(&self, id: WindowId, timestamp: u32) -> Result<()>;

    /// Current compositor event time.
    fn current_time(&self) -> u32;
    /// True on backends (e.g. Wayland) that need a settle delay between
    /// consecutive geometry operations on a window.
    fn needs_settle_delay(&self) -> bool;
}

/// The desktop-wide "enable animations" preference.
pub trait AnimationPrefs: Send + Sync {
    /// Effective value.
    fn enabled(&self) -> bool;
    /// Whether the value was explicitly set, as opposed to following the default.
    fn is_user_set(&self) -> bool;
    /// Explicitly set the value.
    fn set_enabled(&self, enabled: bool);
    /// Drop any explicit value and follow the default again.
    fn reset(&self);
}

/// Global accelerator registration.
pub trait KeyBinder: Send + Sync {
    /// Bind `name` to `accel`; a disabled accelerator unbinds the name.
    fn add_keybinding(&self, name: &str, accel: &Accelerator) -> Result<()>;
    /// Drop the binding for `name`, if any.
    fn remove_keybinding(&self, name: &str);
}

/// A generic modal "switch between windows" chooser.
///
/// Highlight changes, activation and dismissal are reported back to the
/// engine by the host; the chooser itself never calls into the engine.
pub trait ModalChooser: Send + Sync {
    /// Show the chooser over `items`. Returns false when it could not be
    /// shown (e.g. another modal grab is active).
    fn show(&self, items: &[WindowId]) -> bool;
    /// Index of the highlighted item while shown.
    fn selected_index(&self) -> Option<usize>;
    /// Dismiss the chooser.
    fn destroy(&self);
    /// How long the chooser waits, when opened without modifiers held,
    /// before finishing on its own.
    fn no_mods_timeout(&self) -> Duration;
    /// Replace the no-modifiers timeout.
    fn set_no_mods_timeout(&self, timeout: Duration);
}
