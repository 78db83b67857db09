//! Placement planning for single-window actions.
//!
//! Planning reads the window once, updates the rectangle memory, and returns
//! the ordered steps that move the window to its target. Reads that must be
//! atomic with the decision (the maximized-window probe) happen here, not in
//! a step.

use tile_geom::{Corner, Edge, Rect, edge_strip, is_tiled, quarter};
use tile_host::{MaxFlags, WindowHost, WindowId, WindowState};
use tracing::debug;

use crate::{
    Action,
    memory::RectMemory,
    sequencer::{Op, Plan, log_host_result},
};

/// Everything a placement reads and writes besides the window itself.
pub struct PlaceCtx<'a> {
    /// Host the window lives on.
    pub host: &'a dyn WindowHost,
    /// Free rects remembered across placements.
    pub memory: &'a mut RectMemory,
    /// Center the window after a toggle that leaves it floating.
    pub center_on_restore: bool,
}

/// Plan `action` for window `id`. Guards that fail yield an empty plan.
pub fn plan(ctx: &mut PlaceCtx<'_>, id: WindowId, action: Action) -> Plan {
    let mut out = Plan::new();
    let Some(state) = ctx.host.window_state(id) else {
        debug!(window = %id, %action, "place_skipped_window_gone");
        return out;
    };
    if !state.resizeable {
        debug!(window = %id, %action, "place_skipped_not_resizeable");
        return out;
    }
    let Some(area) = ctx.host.work_area(id) else {
        debug!(window = %id, %action, "place_skipped_no_work_area");
        return out;
    };
    debug!(window = %id, %action, frame = %state.frame, %area, "place");
    match action {
        Action::Maximize => maximize(ctx, id, &state, &area, &mut out),
        Action::Minimize => {
            if state.minimized || !state.can_minimize {
                debug!(window = %id, "minimize_skipped");
            } else {
                out.push(0, Op::Minimize(id));
            }
        }
        Action::Quarter(corner) => place_quarter(ctx, id, &state, &area, corner, &mut out),
        Action::Edge(edge) => place_edge(ctx, id, &state, &area, edge, &mut out),
        Action::Toggle => toggle(ctx, id, &state, &area, &mut out),
    }
    out
}

/// Remember `state.frame` as the free rect of `id` if it is not tiled.
///
/// A fully maximized window with nothing remembered is probed instead: it is
/// unmaximized, its floating frame read back, and maximized again.
pub fn save_rect(ctx: &mut PlaceCtx<'_>, id: WindowId, state: &WindowState, area: &Rect) {
    if state.is_fully_maximized() && !ctx.memory.contains(id) {
        let res = ctx.host.unmaximize(id, MaxFlags::BOTH);
        log_host_result(Op::Unmaximize(id, MaxFlags::BOTH), res);
        if let Some(free) = ctx.host.window_state(id) {
            ctx.memory.remember(id, free.frame);
        }
        let res = ctx.host.maximize(id, MaxFlags::BOTH);
        log_host_result(Op::Maximize(id, MaxFlags::BOTH), res);
        return;
    }
    if !is_tiled(&state.frame, area) {
        ctx.memory.remember(id, state.frame);
    }
}

fn maximize(ctx: &mut PlaceCtx<'_>, id: WindowId, state: &WindowState, area: &Rect, out: &mut Plan) {
    save_rect(ctx, id, state, area);
    if state.can_maximize {
        out.push(0, Op::Maximize(id, MaxFlags::BOTH));
    } else {
        debug!(window = %id, "maximize_skipped");
    }
}

fn place_quarter(
    ctx: &mut PlaceCtx<'_>,
    id: WindowId,
    state: &WindowState,
    area: &Rect,
    corner: Corner,
    out: &mut Plan,
) {
    save_rect(ctx, id, state, area);
    let mut at = 0;
    if !state.maximized.is_empty() {
        out.push(at, Op::Unmaximize(id, state.maximized));
        at += 1;
    }
    out.push(at, Op::MoveThenResize(id, quarter(area, corner)));
}

fn place_edge(
    ctx: &mut PlaceCtx<'_>,
    id: WindowId,
    state: &WindowState,
    area: &Rect,
    edge: Edge,
    out: &mut Plan,
) {
    save_rect(ctx, id, state, area);
    // The axis split by the edge must be free; the other one ends maximized.
    let (split, span) = if edge.is_vertical() {
        (MaxFlags::HORIZONTAL, MaxFlags::VERTICAL)
    } else {
        (MaxFlags::VERTICAL, MaxFlags::HORIZONTAL)
    };
    let mut at = 0;
    if state.maximized.contains(split) {
        out.push(at, Op::Unmaximize(id, split));
        at += 1;
    }
    out.push(at, Op::MoveThenResize(id, edge_strip(area, &state.frame, edge)));
    out.push(at + 1, Op::Maximize(id, span));
}

fn toggle(ctx: &mut PlaceCtx<'_>, id: WindowId, state: &WindowState, area: &Rect, out: &mut Plan) {
    let tiled = is_tiled(&state.frame, area);
    if state.maximized.is_empty() && !tiled {
        maximize(ctx, id, state, area, out);
        return;
    }
    let mut at = 0;
    if !state.maximized.is_empty() {
        out.push(at, Op::Unmaximize(id, state.maximized));
        at += 1;
    }
    if tiled && ctx.memory.contains(id) {
        out.push(at, Op::RestoreRemembered(id));
        at += 1;
    }
    if ctx.center_on_restore {
        out.push(at, Op::Center(id, *area));
    }
}
