#![warn(missing_docs)]

//! kptile engine: keypad placements, rectangle memory, step sequencing and
//! the paired-placement selection popup.
//!
//! The [`Engine`] is synchronous. Host events call into it directly; steps
//! that must wait for a settle delay are queued on an internal timeline and
//! executed by [`Engine::run_due`], which [`driver::run`] calls from a tokio
//! task at the right times.

use std::sync::Arc;

use config::Settings;
use tile_geom::Rect;
use tile_host::WindowId;
use tokio::{sync::Notify, time::Instant};
use tracing::{debug, info, warn};

mod action;
mod animation;
pub mod driver;
mod error;
mod memory;
mod placement;
mod popup;
mod sequencer;
mod services;

pub use action::{Action, Binding};
pub use error::{Error, Result};
pub use memory::MEMORY_CAP;
pub use popup::{CONFIRM_KEYSYMS, POPUP_NO_MODS_TIMEOUT, PopupInput, PopupState};
pub use sequencer::{ANIMATION_RESTORE_STEP, STEP_DELAY};
pub use services::Hosts;

use crate::{
    animation::AnimationState,
    memory::RectMemory,
    placement::PlaceCtx,
    popup::{Outcome, PopupSession, Snapshot},
    sequencer::{Entry, Gesture, Op, Plan, Timeline, log_host_result, run_host_op},
};

/// The tiling engine, alive between enable and disable.
pub struct Engine {
    hosts: Hosts,
    settings: Settings,
    memory: RectMemory,
    timeline: Timeline,
    animation: AnimationState,
    popup: Option<PopupSession>,
    next_session: u64,
    wake: Arc<Notify>,
}

impl Engine {
    /// Start the engine and register every configured binding.
    pub fn enable(hosts: Hosts, settings: Settings) -> Self {
        let engine = Self {
            hosts,
            settings,
            memory: RectMemory::new(),
            timeline: Timeline::new(),
            animation: AnimationState::default(),
            popup: None,
            next_session: 1,
            wake: Arc::new(Notify::new()),
        };
        for (name, accel) in engine.settings.keybindings() {
            if let Err(e) = engine.hosts.keys.add_keybinding(name, accel) {
                warn!(name, error = %e, "keybinding_register_failed");
            }
        }
        info!(
            disable_animations = engine.settings.disable_animations,
            center_when_unmaximizing = engine.settings.center_when_unmaximizing,
            "engine_enabled"
        );
        engine
    }

    /// Stop the engine: close any open popup through the full restore pass,
    /// run remaining steps back to back, restore animations and unregister
    /// every binding.
    pub fn disable(mut self) {
        self.close_popup();
        while let Some(entry) = self.timeline.pop_front() {
            self.execute(entry);
        }
        self.animation.restore(self.hosts.animations.as_ref());
        for (name, _) in self.settings.keybindings() {
            self.hosts.keys.remove_keybinding(name);
        }
        info!("engine_disabled");
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the action bound to `name` against the focused window.
    pub fn dispatch(&mut self, name: &str) -> Result<()> {
        let binding =
            Binding::from_name(name).ok_or_else(|| Error::UnknownBinding(name.to_string()))?;
        debug!(name, ?binding, "dispatch");
        match binding {
            Binding::Tile(action) => self.tile(action),
            Binding::Paired { first, second } => self.paired(first, second),
        }
        Ok(())
    }

    /// Replace the settings, re-registering accelerators that changed.
    pub fn update_settings(&mut self, settings: Settings) {
        for (name, accel) in settings.keybindings() {
            if self.settings.accelerator(name) == Some(accel) {
                continue;
            }
            if let Err(e) = self.hosts.keys.add_keybinding(name, accel) {
                warn!(name, error = %e, "keybinding_register_failed");
            }
        }
        self.settings = settings;
        debug!("settings_updated");
    }

    /// Change one accelerator. Failures are logged and returned; the engine
    /// keeps running with the previous binding.
    pub fn set_accelerator(&mut self, name: &str, text: &str) -> Result<()> {
        if let Err(e) = self.settings.set_accelerator(name, text) {
            warn!(name, error = %e, "can't change keybinding");
            return Err(e.into());
        }
        if let Some(accel) = self.settings.accelerator(name) {
            self.hosts.keys.add_keybinding(name, accel)?;
        }
        Ok(())
    }

    /// Drop everything held for a window the host stopped managing.
    pub fn window_closed(&mut self, id: WindowId) {
        self.memory.forget(id);
        if let Some(p) = self.popup.as_mut() {
            p.forget(id);
        }
        let n = self.timeline.cancel(|e| e.op.window() == Some(id));
        debug!(window = %id, cancelled = n, "window_closed");
    }

    /// Remembered free rect of `id`.
    pub fn remembered(&self, id: WindowId) -> Option<Rect> {
        self.memory.get(id)
    }

    /// State of the open popup, if any.
    pub fn popup_state(&self) -> Option<PopupState> {
        self.popup.as_ref().map(|p| p.state)
    }

    /// The chooser highlight moved to `index`.
    pub fn popup_select(&mut self, index: usize) -> Result<()> {
        self.popup_input(PopupInput::Select(index))
    }

    /// A key was pressed while the chooser is shown. Returns true when the
    /// key was consumed as a confirm.
    pub fn popup_key_press(&mut self, keysym: u32) -> bool {
        CONFIRM_KEYSYMS.contains(&keysym)
            && self.popup_input(PopupInput::KeyPress(keysym)).is_ok()
    }

    /// A chooser item was activated directly.
    pub fn popup_item_activated(&mut self, index: usize) -> Result<()> {
        self.popup_input(PopupInput::ItemActivated(index))
    }

    /// The chooser's no-modifiers timeout elapsed: confirm.
    pub fn popup_no_mods_timeout(&mut self) -> Result<()> {
        self.popup_input(PopupInput::NoModsTimeout)
    }

    /// The trigger modifiers were released without a confirm: cancel.
    pub fn popup_modifiers_released(&mut self) -> Result<()> {
        self.popup_input(PopupInput::ModifiersReleased)
    }

    /// The chooser was destroyed by the host: cancel unless confirmed.
    pub fn popup_destroyed(&mut self) -> Result<()> {
        self.popup_input(PopupInput::Destroyed)
    }

    /// Feed one input to the open popup.
    pub fn popup_input(&mut self, input: PopupInput) -> Result<()> {
        let session = self.popup.as_mut().ok_or(Error::NoPopup)?;
        match session.handle(input) {
            Outcome::Ignored => {}
            Outcome::Raise(id) => {
                let res = self
                    .hosts
                    .windows
                    .activate(id, self.hosts.windows.current_time());
                log_host_result(Op::Activate(id), res);
            }
            Outcome::Close => self.close_popup(),
        }
        Ok(())
    }

    /// Execute every queued step that is due. Returns how many ran.
    pub fn run_due(&mut self) -> usize {
        let mut n = 0;
        while let Some(entry) = self.timeline.pop_due(Instant::now()) {
            self.execute(entry);
            n += 1;
        }
        n
    }

    /// When the next queued step falls due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timeline.next_deadline()
    }

    /// True when nothing is queued and no popup is open.
    pub fn is_idle(&self) -> bool {
        self.timeline.is_empty() && self.popup.is_none()
    }

    /// Notifier signalled whenever steps are queued.
    pub fn waker(&self) -> Arc<Notify> {
        self.wake.clone()
    }

    fn tile(&mut self, action: Action) {
        let Some(id) = self.focused_resizeable() else {
            return;
        };
        self.animation
            .suspend(self.hosts.animations.as_ref(), self.settings.disable_animations);
        let gesture = Gesture::now(None);
        let plan = self.plan(id, action);
        self.submit(gesture, plan);
        self.schedule(gesture, ANIMATION_RESTORE_STEP, Op::EnableAnimations);
    }

    fn paired(&mut self, first: Action, second: Action) {
        // One session at a time.
        if let Some(p) = &self.popup {
            debug!(session = p.id, "paired_ignored_popup_open");
            return;
        }
        let Some(trigger) = self.focused_resizeable() else {
            return;
        };
        self.animation
            .suspend(self.hosts.animations.as_ref(), self.settings.disable_animations);
        let host = self.hosts.windows.clone();
        let others: Vec<WindowId> = host
            .workspace_windows()
            .into_iter()
            .filter(|w| *w != trigger)
            .filter(|w| host.window_state(*w).is_some_and(|s| s.resizeable))
            .collect();

        let gesture = Gesture::now(None);
        if others.is_empty() {
            debug!(window = %trigger, "paired_without_candidates");
            let plan = self.plan(trigger, first);
            self.submit(gesture, plan);
            self.schedule(gesture, ANIMATION_RESTORE_STEP, Op::EnableAnimations);
            return;
        }
        self.open_popup(trigger, first, second, others);
    }

    fn open_popup(&mut self, trigger: WindowId, first: Action, second: Action, others: Vec<WindowId>) {
        let id = self.next_session;
        self.next_session += 1;
        let chooser = self.hosts.chooser.clone();
        let saved_timeout = chooser.no_mods_timeout();
        chooser.set_no_mods_timeout(POPUP_NO_MODS_TIMEOUT);
        self.popup = Some(PopupSession::new(id, trigger, second, others.clone(), saved_timeout));
        debug!(session = id, window = %trigger, candidates = others.len(), "popup_open");

        let gesture = Gesture::now(Some(id));
        let mut slot = 0;
        if self.take_snapshot(trigger, Some(id)) {
            slot += 1;
        }
        self.schedule(gesture, slot, Op::Place(trigger, first));
        slot += 2;
        for w in &others {
            self.schedule(gesture, slot, Op::Snapshot(*w));
            self.schedule(gesture, slot + 1, Op::Place(*w, second));
            slot += 2;
        }

        if !chooser.show(&others) {
            debug!(session = id, "popup_show_refused");
            self.close_popup();
            return;
        }
        if let Some(p) = self.popup.as_mut() {
            p.state = PopupState::Selecting;
            if let Some(i) = chooser.selected_index() {
                p.selected = i.min(p.candidates.len().saturating_sub(1));
            }
        }
        if let Some(w) = self.popup.as_ref().and_then(PopupSession::highlighted) {
            let res = self.hosts.windows.activate(w, self.hosts.windows.current_time());
            log_host_result(Op::Activate(w), res);
        }
    }

    /// Snapshot `id` into the open session `session`, unmaximizing it first.
    /// Returns true when an unmaximize was issued.
    fn take_snapshot(&mut self, id: WindowId, session: Option<u64>) -> bool {
        let Some(p) = self.popup.as_mut().filter(|p| Some(p.id) == session) else {
            debug!(window = %id, "snapshot_skipped_session_closed");
            return false;
        };
        let host = self.hosts.windows.as_ref();
        let Some(state) = host.window_state(id) else {
            debug!(window = %id, "snapshot_skipped_window_gone");
            return false;
        };
        let flags = state.maximized;
        let mut unmaximized = false;
        if !flags.is_empty() {
            log_host_result(Op::Unmaximize(id, flags), host.unmaximize(id, flags));
            unmaximized = true;
        }
        let rect = host.window_state(id).map_or(state.frame, |s| s.frame);
        p.record_snapshot(id, Snapshot { rect, maximized: flags });
        unmaximized
    }

    /// The close pass. Safe to call when no popup is open.
    fn close_popup(&mut self) {
        let Some(mut session) = self.popup.take() else {
            return;
        };
        if matches!(session.state, PopupState::Opening | PopupState::Selecting) {
            session.state = PopupState::Cancelled;
        }
        let restore = session.to_restore();
        let sid = session.id;
        let dropped = self.timeline.cancel(|e| {
            e.session == Some(sid)
                && (matches!(e.op, Op::Snapshot(_))
                    || e.op.window().is_some_and(|w| restore.contains(&w)))
        });
        debug!(
            session = sid,
            state = ?session.state,
            kept = ?session.kept(),
            restore = restore.len(),
            dropped,
            "popup_close"
        );

        let plan = session.take_restore_plan();
        self.submit(Gesture::now(None), plan);

        let chooser = self.hosts.chooser.clone();
        chooser.destroy();
        chooser.set_no_mods_timeout(session.saved_timeout);

        let host = self.hosts.windows.clone();
        let res = host.activate(session.trigger, host.current_time());
        log_host_result(Op::Activate(session.trigger), res);

        self.schedule(Gesture::now(None), ANIMATION_RESTORE_STEP, Op::EnableAnimations);
        session.state = PopupState::Closed;
    }

    fn focused_resizeable(&self) -> Option<WindowId> {
        let host = self.hosts.windows.as_ref();
        let Some(id) = host.focus_window() else {
            debug!("no_focus_window");
            return None;
        };
        if !host.window_state(id).is_some_and(|s| s.resizeable) {
            debug!(window = %id, "focus_window_not_resizeable");
            return None;
        }
        Some(id)
    }

    fn plan(&mut self, id: WindowId, action: Action) -> Plan {
        let host = self.hosts.windows.clone();
        let mut ctx = PlaceCtx {
            host: host.as_ref(),
            memory: &mut self.memory,
            center_on_restore: self.settings.center_when_unmaximizing,
        };
        placement::plan(&mut ctx, id, action)
    }

    fn submit(&mut self, gesture: Gesture, plan: Plan) {
        for step in plan {
            self.schedule(gesture, step.at, step.op);
        }
    }

    /// Run `op` now, or queue it at its offset on settle-delay backends.
    fn schedule(&mut self, gesture: Gesture, at: u32, op: Op) {
        let entry = Entry {
            op,
            session: gesture.session,
        };
        if at == 0 || !self.hosts.windows.needs_settle_delay() {
            self.execute(entry);
            return;
        }
        self.timeline.push(gesture.due(at), entry);
        self.wake.notify_one();
    }

    fn execute(&mut self, entry: Entry) {
        let host = self.hosts.windows.clone();
        if run_host_op(host.as_ref(), entry.op) {
            return;
        }
        match entry.op {
            Op::RestoreRemembered(id) => match self.memory.take(id) {
                Some(rect) => {
                    let res = sequencer::move_then_resize(host.as_ref(), id, rect);
                    log_host_result(entry.op, res);
                }
                None => debug!(window = %id, "restore_skipped_nothing_remembered"),
            },
            Op::Center(id, area) => {
                if let Some(state) = host.window_state(id) {
                    let r = state.frame.centered_in(&area);
                    log_host_result(entry.op, host.move_frame(id, r.x, r.y));
                }
            }
            Op::Snapshot(id) => {
                self.take_snapshot(id, entry.session);
            }
            Op::Place(id, action) => {
                let plan = self.plan(id, action);
                self.submit(Gesture::now(entry.session), plan);
            }
            Op::EnableAnimations => self.animation.restore(self.hosts.animations.as_ref()),
            Op::Maximize(..)
            | Op::Unmaximize(..)
            | Op::Minimize(_)
            | Op::MoveThenResize(..)
            | Op::Activate(_) => {}
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if self.animation.is_suspended() {
            self.animation.restore(self.hosts.animations.as_ref());
        }
    }
}
