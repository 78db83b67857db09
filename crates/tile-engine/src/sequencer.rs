//! Step sequencing for gestures.
//!
//! A gesture is submitted as a [`Plan`]: window operations tagged with a step
//! index. On backends that need a settle delay between geometry calls, step
//! `n` is queued on the [`Timeline`] at `origin + n * STEP_DELAY`; all offsets
//! are absolute from the gesture origin, so steps of different windows
//! scheduled from one origin interleave by offset. Elsewhere every step runs
//! as soon as it is submitted.

use std::{collections::BTreeMap, time::Duration, vec::IntoIter};

use tile_geom::Rect;
use tile_host::{MaxFlags, WindowHost, WindowId};
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::Action;

/// Delay between consecutive steps of a gesture.
pub const STEP_DELAY: Duration = Duration::from_millis(50);

/// Step at which suppressed animations are switched back on.
pub const ANIMATION_RESTORE_STEP: u32 = 3;

/// A single deferred unit of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Maximize the given axes.
    Maximize(WindowId, MaxFlags),
    /// Unmaximize the given axes.
    Unmaximize(WindowId, MaxFlags),
    Minimize(WindowId),
    /// Move, resize, then move again to `rect`.
    MoveThenResize(WindowId, Rect),
    /// Move-then-resize to the remembered free rect, consuming it.
    RestoreRemembered(WindowId),
    /// Center the window's current frame on the given usable area.
    Center(WindowId, Rect),
    /// Raise and focus.
    Activate(WindowId),
    /// Record a popup snapshot for the window (unmaximizing it first).
    Snapshot(WindowId),
    /// Run a whole placement, planned when the step fires.
    Place(WindowId, Action),
    /// Put the animation preference back the way it was found.
    EnableAnimations,
}

impl Op {
    /// Window the operation touches, if any.
    pub fn window(&self) -> Option<WindowId> {
        match *self {
            Self::Maximize(id, _)
            | Self::Unmaximize(id, _)
            | Self::Minimize(id)
            | Self::MoveThenResize(id, _)
            | Self::RestoreRemembered(id)
            | Self::Center(id, _)
            | Self::Activate(id)
            | Self::Snapshot(id)
            | Self::Place(id, _) => Some(id),
            Self::EnableAnimations => None,
        }
    }
}

/// An operation and the step it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Step index, counted from the gesture origin.
    pub at: u32,
    /// Work to do at that step.
    pub op: Op,
}

/// Ordered steps of one gesture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    /// Empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `op` at step `at`.
    pub fn push(&mut self, at: u32, op: Op) {
        self.steps.push(Step { at, op });
    }

    /// Steps in submission order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Last step index used, if any.
    pub fn last_step(&self) -> Option<u32> {
        self.steps.iter().map(|s| s.at).max()
    }
}

impl IntoIterator for Plan {
    type Item = Step;
    type IntoIter = IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Origin and popup session shared by all steps of a gesture.
#[derive(Clone, Copy, Debug)]
pub struct Gesture {
    /// Instant step 0 belongs to.
    pub origin: Instant,
    /// Popup session the gesture runs for, if any.
    pub session: Option<u64>,
}

impl Gesture {
    /// A gesture starting now.
    pub fn now(session: Option<u64>) -> Self {
        Self {
            origin: Instant::now(),
            session,
        }
    }

    /// Absolute time of step `at`.
    pub fn due(&self, at: u32) -> Instant {
        self.origin + STEP_DELAY * at
    }
}

/// A queued operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Operation to run.
    pub op: Op,
    /// Popup session that scheduled the operation.
    pub session: Option<u64>,
}

/// Pending operations ordered by due time, then by submission order.
#[derive(Debug, Default)]
pub struct Timeline {
    /// Keyed by due time and a tie-breaking sequence number.
    entries: BTreeMap<(Instant, u64), Entry>,
    /// Last sequence number handed out.
    seq: u64,
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `entry` to run at `due`.
    pub fn push(&mut self, due: Instant, entry: Entry) {
        self.seq += 1;
        trace!(op = ?entry.op, seq = self.seq, "timeline_push");
        self.entries.insert((due, self.seq), entry);
    }

    /// Remove and return the earliest entry due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Entry> {
        let (&key, _) = self.entries.iter().next()?;
        if key.0 > now {
            return None;
        }
        self.entries.remove(&key)
    }

    /// Remove and return the earliest entry regardless of its due time.
    pub fn pop_front(&mut self) -> Option<Entry> {
        self.entries.pop_first().map(|(_, e)| e)
    }

    /// Due time of the earliest entry.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    /// Drop every entry matching `pred`, returning how many were dropped.
    pub fn cancel(&mut self, mut pred: impl FnMut(&Entry) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| !pred(e));
        let n = before - self.entries.len();
        if n > 0 {
            trace!(n, "timeline_cancel");
        }
        n
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Issue a move-then-resize to `rect`: a leading move on settle-delay
/// backends, the combined call, then a trailing move some clients need
/// before they honour the position.
pub fn move_then_resize(host: &dyn WindowHost, id: WindowId, rect: Rect) -> tile_host::Result<()> {
    if host.needs_settle_delay() {
        host.move_frame(id, rect.x, rect.y)?;
    }
    host.move_resize_frame(id, rect)?;
    host.move_frame(id, rect.x, rect.y)
}

/// Run a primitive host operation. Returns false for ops that need engine
/// state and were not handled here.
pub fn run_host_op(host: &dyn WindowHost, op: Op) -> bool {
    let res = match op {
        Op::Maximize(id, flags) => host.maximize(id, flags),
        Op::Unmaximize(id, flags) => host.unmaximize(id, flags),
        Op::Minimize(id) => host.minimize(id),
        Op::MoveThenResize(id, rect) => move_then_resize(host, id, rect),
        Op::Activate(id) => host.activate(id, host.current_time()),
        Op::RestoreRemembered(_)
        | Op::Center(..)
        | Op::Snapshot(_)
        | Op::Place(..)
        | Op::EnableAnimations => return false,
    };
    log_host_result(op, res);
    true
}

/// Log the outcome of a host call; failures never propagate out of a gesture.
pub fn log_host_result(op: Op, res: tile_host::Result<()>) {
    match res {
        Ok(()) => debug!(?op, "host_op"),
        Err(tile_host::Error::WindowGone(id)) => {
            debug!(window = %id, ?op, "host_op_skipped_window_gone");
        }
        Err(e) => warn!(?op, error = %e, "host_op_failed"),
    }
}
