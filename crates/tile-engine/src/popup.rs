//! Selection popup session for paired actions.
//!
//! The session lives from the paired key press until the chooser goes away.
//! It owns the per-window snapshots taken before the session touched a
//! window; the close pass turns them into restore plans and drops them all.

use std::{collections::HashMap, time::Duration};

use tile_geom::Rect;
use tile_host::{MaxFlags, WindowId};
use tracing::debug;

use crate::{
    Action,
    sequencer::{Op, Plan},
};

/// Chooser timeout used while a session is open.
pub const POPUP_NO_MODS_TIMEOUT: Duration = Duration::from_millis(4500);

/// Keysyms that confirm the highlighted window at once: Return, KP_Enter.
pub const CONFIRM_KEYSYMS: [u32; 2] = [0xff0d, 0xff8d];

/// Lifecycle of a popup session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    /// Placements are being scheduled and the chooser is not shown yet.
    Opening,
    /// The chooser is shown.
    Selecting,
    /// The highlighted window keeps its placement.
    Confirmed,
    /// Every touched window, the trigger included, is restored.
    Cancelled,
    /// Torn down.
    Closed,
}

/// Input reported by the host while the chooser is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupInput {
    /// Highlight moved to an item.
    Select(usize),
    /// A key was pressed in the chooser.
    KeyPress(u32),
    /// An item was activated (clicked).
    ItemActivated(usize),
    /// The no-modifiers timeout elapsed.
    NoModsTimeout,
    /// The trigger modifiers were released without a confirm.
    ModifiersReleased,
    /// The chooser was destroyed from outside.
    Destroyed,
}

/// What the engine should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    Ignored,
    /// Raise this window.
    Raise(WindowId),
    /// Run the close pass.
    Close,
}

/// Geometry of a window before the session touched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Floating frame, read after unmaximizing.
    pub rect: Rect,
    /// Axes that were maximized.
    pub maximized: MaxFlags,
}

/// One open popup.
#[derive(Debug)]
pub struct PopupSession {
    /// Session number, tagged on every step it schedules.
    pub id: u64,
    /// Window that was focused when the paired key fired.
    pub trigger: WindowId,
    /// Placement pre-applied to every candidate.
    pub second: Action,
    /// Chooser items, in chooser order.
    pub candidates: Vec<WindowId>,
    /// Index of the highlighted candidate.
    pub selected: usize,
    pub state: PopupState,
    /// Chooser timeout to put back on close.
    pub saved_timeout: Duration,
    /// Pre-session geometry per touched window.
    snapshots: HashMap<WindowId, Snapshot>,
}

impl PopupSession {
    /// Session in the opening state with the first candidate highlighted.
    pub fn new(
        id: u64,
        trigger: WindowId,
        second: Action,
        candidates: Vec<WindowId>,
        saved_timeout: Duration,
    ) -> Self {
        Self {
            id,
            trigger,
            second,
            candidates,
            selected: 0,
            state: PopupState::Opening,
            saved_timeout,
            snapshots: HashMap::new(),
        }
    }

    /// Store the pre-session geometry of `id`, replacing any earlier one.
    pub fn record_snapshot(&mut self, id: WindowId, snap: Snapshot) {
        debug!(session = self.id, window = %id, rect = %snap.rect, flags = ?snap.maximized, "popup_snapshot");
        self.snapshots.insert(id, snap);
    }

    pub fn snapshot(&self, id: WindowId) -> Option<Snapshot> {
        self.snapshots.get(&id).copied()
    }

    /// Forget a window the host no longer manages.
    pub fn forget(&mut self, id: WindowId) {
        self.snapshots.remove(&id);
    }

    /// Candidate under the chooser highlight.
    pub fn highlighted(&self) -> Option<WindowId> {
        self.candidates.get(self.selected).copied()
    }

    /// Advance the state machine.
    pub fn handle(&mut self, input: PopupInput) -> Outcome {
        if matches!(self.state, PopupState::Closed) {
            return Outcome::Ignored;
        }
        match input {
            PopupInput::Select(i) => {
                if i >= self.candidates.len() || i == self.selected {
                    return Outcome::Ignored;
                }
                self.selected = i;
                Outcome::Raise(self.candidates[i])
            }
            PopupInput::KeyPress(sym) if CONFIRM_KEYSYMS.contains(&sym) => self.confirm(),
            PopupInput::KeyPress(_) => Outcome::Ignored,
            PopupInput::ItemActivated(i) => {
                if i < self.candidates.len() {
                    self.selected = i;
                }
                self.confirm()
            }
            PopupInput::NoModsTimeout => self.confirm(),
            PopupInput::ModifiersReleased | PopupInput::Destroyed => {
                if self.state != PopupState::Confirmed {
                    self.state = PopupState::Cancelled;
                }
                Outcome::Close
            }
        }
    }

    fn confirm(&mut self) -> Outcome {
        self.state = PopupState::Confirmed;
        Outcome::Close
    }

    /// The window that keeps its secondary placement, if confirmed.
    pub fn kept(&self) -> Option<WindowId> {
        match self.state {
            PopupState::Confirmed => self.highlighted(),
            _ => None,
        }
    }

    /// Windows the close pass must put back.
    pub fn to_restore(&self) -> Vec<WindowId> {
        match self.state {
            PopupState::Confirmed => {
                let kept = self.kept();
                self.candidates
                    .iter()
                    .copied()
                    .filter(|w| Some(*w) != kept)
                    .collect()
            }
            _ => self
                .candidates
                .iter()
                .copied()
                .chain([self.trigger])
                .collect(),
        }
    }

    /// Build the restore plan and drop every snapshot. Windows without a
    /// snapshot are skipped.
    pub fn take_restore_plan(&mut self) -> Plan {
        let mut plan = Plan::new();
        for id in self.to_restore() {
            let Some(snap) = self.snapshots.remove(&id) else {
                debug!(session = self.id, window = %id, "popup_restore_skipped_no_snapshot");
                continue;
            };
            plan.push(0, Op::Unmaximize(id, MaxFlags::BOTH));
            plan.push(1, Op::MoveThenResize(id, snap.rect));
            if !snap.maximized.is_empty() {
                plan.push(2, Op::Maximize(id, snap.maximized));
            }
        }
        self.snapshots.clear();
        plan
    }
}
