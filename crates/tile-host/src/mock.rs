//! In-memory host used by tests and the simulator (enabled with the
//! `test-utils` feature).
//!
//! Maximize follows the usual compositor model: the first maximized axis
//! saves the floating frame, and unmaximizing an axis restores that axis from
//! the saved frame.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use config::Accelerator;
use parking_lot::Mutex;
use tile_geom::Rect;
use tracing::trace;

use crate::{
    AnimationPrefs, Error, KeyBinder, MaxFlags, ModalChooser, Result, WindowHost, WindowId,
    WindowState,
};

/// Default chooser timeout of a typical shell switcher.
pub const DEFAULT_NO_MODS_TIMEOUT: Duration = Duration::from_millis(1500);

/// A mutating call received by the mock, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Maximize(WindowId, MaxFlags),
    Unmaximize(WindowId, MaxFlags),
    Minimize(WindowId),
    MoveFrame(WindowId, i32, i32),
    MoveResize(WindowId, Rect),
    Activate(WindowId),
}

impl HostCall {
    /// Window the call targeted.
    pub fn window(&self) -> WindowId {
        match *self {
            Self::Maximize(id, _)
            | Self::Unmaximize(id, _)
            | Self::Minimize(id)
            | Self::MoveFrame(id, ..)
            | Self::MoveResize(id, _)
            | Self::Activate(id) => id,
        }
    }
}

#[derive(Debug)]
struct MockWindow {
    id: WindowId,
    state: WindowState,
    /// Floating frame saved on first maximize.
    saved: Rect,
}

#[derive(Debug)]
struct ChooserState {
    items: Option<Vec<WindowId>>,
    selected: usize,
    refuses: bool,
    destroyed: bool,
    no_mods_timeout: Duration,
}

#[derive(Debug)]
struct MockState {
    area: Rect,
    windows: Vec<MockWindow>,
    focus: Option<WindowId>,
    next_id: u64,
    time: u32,
    settle_delay: bool,
    calls: Vec<HostCall>,
    animations_enabled: bool,
    animations_user_set: bool,
    bindings: BTreeMap<String, String>,
    chooser: ChooserState,
}

impl MockState {
    fn window_mut(&mut self, id: WindowId) -> Result<&mut MockWindow> {
        self.windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(Error::WindowGone(id))
    }

    fn record(&mut self, call: HostCall) {
        trace!(?call, "mock_host_call");
        self.calls.push(call);
    }
}

/// Simulated compositor implementing every host trait.
#[derive(Clone, Debug)]
pub struct MockHost {
    inner: Arc<Mutex<MockState>>,
}

impl MockHost {
    /// A host with a single monitor whose usable area is `area`.
    pub fn new(area: Rect) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState {
                area,
                windows: Vec::new(),
                focus: None,
                next_id: 1,
                time: 1000,
                settle_delay: false,
                calls: Vec::new(),
                animations_enabled: true,
                animations_user_set: false,
                bindings: BTreeMap::new(),
                chooser: ChooserState {
                    items: None,
                    selected: 0,
                    refuses: false,
                    destroyed: false,
                    no_mods_timeout: DEFAULT_NO_MODS_TIMEOUT,
                },
            })),
        }
    }

    /// Toggle Wayland-like settle delays.
    pub fn set_settle_delay(&self, on: bool) {
        self.inner.lock().settle_delay = on;
    }

    /// Change the usable area.
    pub fn set_work_area(&self, area: Rect) {
        self.inner.lock().area = area;
    }

    /// Add a window at the end of the switcher order. The first window added
    /// receives focus.
    pub fn add_window(&self, state: WindowState) -> WindowId {
        let mut g = self.inner.lock();
        let id = WindowId::new(g.next_id);
        g.next_id += 1;
        let mut state = state;
        let saved = state.frame;
        let area = g.area;
        if !state.maximized.is_empty() {
            state.frame = maximized_frame(saved, area, state.maximized);
        }
        g.windows.push(MockWindow { id, state, saved });
        if g.focus.is_none() {
            g.focus = Some(id);
        }
        id
    }

    /// Stop managing `id`.
    pub fn close_window(&self, id: WindowId) {
        let mut g = self.inner.lock();
        g.windows.retain(|w| w.id != id);
        if g.focus == Some(id) {
            g.focus = None;
        }
    }

    pub fn set_focus(&self, id: Option<WindowId>) {
        self.inner.lock().focus = id;
    }

    /// Overwrite a window's state without recording a call.
    pub fn set_state(&self, id: WindowId, state: WindowState) {
        let mut g = self.inner.lock();
        if let Ok(w) = g.window_mut(id) {
            w.state = state;
        }
    }

    /// Current frame of `id`.
    pub fn frame(&self, id: WindowId) -> Option<Rect> {
        self.window_state(id).map(|s| s.frame)
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.inner.lock().calls.clone()
    }

    /// Calls that targeted `id`.
    pub fn calls_for(&self, id: WindowId) -> Vec<HostCall> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| c.window() == id)
            .copied()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }

    /// Seed the animation preference.
    pub fn set_animation_pref(&self, enabled: bool, user_set: bool) {
        let mut g = self.inner.lock();
        g.animations_enabled = enabled;
        g.animations_user_set = user_set;
    }

    /// `(enabled, user_set)` of the animation preference.
    pub fn animation_pref(&self) -> (bool, bool) {
        let g = self.inner.lock();
        (g.animations_enabled, g.animations_user_set)
    }

    /// Registered accelerators, rendered as strings.
    pub fn bindings(&self) -> BTreeMap<String, String> {
        self.inner.lock().bindings.clone()
    }

    /// Items of the chooser while it is shown.
    pub fn chooser_items(&self) -> Option<Vec<WindowId>> {
        self.inner.lock().chooser.items.clone()
    }

    /// Make the next `show` fail.
    pub fn set_chooser_refuses(&self, refuses: bool) {
        self.inner.lock().chooser.refuses = refuses;
    }

    /// Move the chooser highlight, as user input would.
    pub fn chooser_select(&self, index: usize) {
        self.inner.lock().chooser.selected = index;
    }

    /// True once `destroy` was called on a shown chooser.
    pub fn chooser_destroyed(&self) -> bool {
        self.inner.lock().chooser.destroyed
    }
}

/// Frame of a window maximized on `flags`, starting from floating `frame`.
fn maximized_frame(frame: Rect, area: Rect, flags: MaxFlags) -> Rect {
    let mut r = frame;
    if flags.contains(MaxFlags::HORIZONTAL) {
        r.x = area.x;
        r.w = area.w;
    }
    if flags.contains(MaxFlags::VERTICAL) {
        r.y = area.y;
        r.h = area.h;
    }
    r
}

impl WindowHost for MockHost {
    fn focus_window(&self) -> Option<WindowId> {
        self.inner.lock().focus
    }

    fn workspace_windows(&self) -> Vec<WindowId> {
        self.inner.lock().windows.iter().map(|w| w.id).collect()
    }

    fn window_state(&self, id: WindowId) -> Option<WindowState> {
        self.inner
            .lock()
            .windows
            .iter()
            .find(|w| w.id == id)
            .map(|w| w.state)
    }

    fn work_area(&self, id: WindowId) -> Option<Rect> {
        let g = self.inner.lock();
        g.windows.iter().any(|w| w.id == id).then_some(g.area)
    }

    fn maximize(&self, id: WindowId, flags: MaxFlags) -> Result<()> {
        let mut g = self.inner.lock();
        g.record(HostCall::Maximize(id, flags));
        let area = g.area;
        let w = g.window_mut(id)?;
        if w.state.maximized.is_empty() {
            w.saved = w.state.frame;
        }
        w.state.maximized |= flags;
        w.state.frame = maximized_frame(w.state.frame, area, flags);
        Ok(())
    }

    fn unmaximize(&self, id: WindowId, flags: MaxFlags) -> Result<()> {
        let mut g = self.inner.lock();
        g.record(HostCall::Unmaximize(id, flags));
        let w = g.window_mut(id)?;
        let cleared = w.state.maximized & flags;
        w.state.maximized.remove(flags);
        if cleared.contains(MaxFlags::HORIZONTAL) {
            w.state.frame.x = w.saved.x;
            w.state.frame.w = w.saved.w;
        }
        if cleared.contains(MaxFlags::VERTICAL) {
            w.state.frame.y = w.saved.y;
            w.state.frame.h = w.saved.h;
        }
        Ok(())
    }

    fn minimize(&self, id: WindowId) -> Result<()> {
        let mut g = self.inner.lock();
        g.record(HostCall::Minimize(id));
        g.window_mut(id)?.state.minimized = true;
        Ok(())
    }

    fn move_frame(&self, id: WindowId, x: i32, y: i32) -> Result<()> {
        let mut g = self.inner.lock();
        g.record(HostCall::MoveFrame(id, x, y));
        let w = g.window_mut(id)?;
        w.state.frame = w.state.frame.with_origin(x, y);
        Ok(())
    }

    fn move_resize_frame(&self, id: WindowId, rect: Rect) -> Result<()> {
        let mut g = self.inner.lock();
        g.record(HostCall::MoveResize(id, rect));
        g.window_mut(id)?.state.frame = rect;
        Ok(())
    }

    fn activate(&self, id: WindowId, _timestamp: u32) -> Result<()> {
        let mut g = self.inner.lock();
        g.record(HostCall::Activate(id));
        g.window_mut(id)?;
        g.focus = Some(id);
        Ok(())
    }

    fn current_time(&self) -> u32 {
        let mut g = self.inner.lock();
        g.time = g.time.wrapping_add(1);
        g.time
    }

    fn needs_settle_delay(&self) -> bool {
        self.inner.lock().settle_delay
    }
}

impl AnimationPrefs for MockHost {
    fn enabled(&self) -> bool {
        self.inner.lock().animations_enabled
    }

    fn is_user_set(&self) -> bool {
        self.inner.lock().animations_user_set
    }

    fn set_enabled(&self, enabled: bool) {
        let mut g = self.inner.lock();
        g.animations_enabled = enabled;
        g.animations_user_set = true;
    }

    fn reset(&self) {
        let mut g = self.inner.lock();
        g.animations_enabled = true;
        g.animations_user_set = false;
    }
}

impl KeyBinder for MockHost {
    fn add_keybinding(&self, name: &str, accel: &Accelerator) -> Result<()> {
        let mut g = self.inner.lock();
        if accel.is_disabled() {
            g.bindings.remove(name);
        } else {
            g.bindings.insert(name.to_string(), accel.to_string());
        }
        Ok(())
    }

    fn remove_keybinding(&self, name: &str) {
        self.inner.lock().bindings.remove(name);
    }
}

impl ModalChooser for MockHost {
    fn show(&self, items: &[WindowId]) -> bool {
        let mut g = self.inner.lock();
        if g.chooser.refuses || items.is_empty() {
            return false;
        }
        g.chooser.items = Some(items.to_vec());
        g.chooser.selected = 0;
        g.chooser.destroyed = false;
        true
    }

    fn selected_index(&self) -> Option<usize> {
        let g = self.inner.lock();
        g.chooser.items.as_ref().map(|_| g.chooser.selected)
    }

    fn destroy(&self) {
        let mut g = self.inner.lock();
        if g.chooser.items.take().is_some() {
            g.chooser.destroyed = true;
        }
    }

    fn no_mods_timeout(&self) -> Duration {
        self.inner.lock().chooser.no_mods_timeout
    }

    fn set_no_mods_timeout(&self, timeout: Duration) {
        self.inner.lock().chooser.no_mods_timeout = timeout;
    }
}
