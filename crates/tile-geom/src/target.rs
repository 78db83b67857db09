// Target rectangles for keypad placements.
//
// Odd spans are split so the first (left/top) tile takes the ceil half and
// the second tile starts right after it with the floor half; the two tiles
// always cover the area exactly.

use serde::{Deserialize, Serialize};

use crate::rect::{Rect, split_len};

/// A corner of the usable area, addressed by quarter actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    /// Keypad 7.
    TopLeft,
    /// Keypad 9.
    TopRight,
    /// Keypad 1.
    BottomLeft,
    /// Keypad 3.
    BottomRight,
}

/// An edge of the usable area, addressed by half actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// Keypad 4.
    Left,
    /// Keypad 6.
    Right,
    /// Keypad 8.
    Top,
    /// Keypad 2.
    Bottom,
}

impl Edge {
    /// True for edges that split the width (left/right).
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// `(start, len)` of the first or second half of a span.
#[inline]
fn half_span(start: i32, len: i32, second: bool) -> (i32, i32) {
    let (lo, hi) = split_len(len);
    if second { (start + hi, lo) } else { (start, hi) }
}

/// Quarter of `area` anchored at `corner`.
pub fn quarter(area: &Rect, corner: Corner) -> Rect {
    let right = matches!(corner, Corner::TopRight | Corner::BottomRight);
    let bottom = matches!(corner, Corner::BottomLeft | Corner::BottomRight);
    let (x, w) = half_span(area.x, area.w, right);
    let (y, h) = half_span(area.y, area.h, bottom);
    Rect::new(x, y, w, h)
}

/// The thin strip a half action moves to before maximizing the other axis.
///
/// The axis split by `edge` is snapped to the matching half of `area`; the
/// other axis keeps `current`'s position and size.
pub fn edge_strip(area: &Rect, current: &Rect, edge: Edge) -> Rect {
    match edge {
        Edge::Left | Edge::Right => {
            let (x, w) = half_span(area.x, area.w, edge == Edge::Right);
            Rect::new(x, current.y, w, current.h)
        }
        Edge::Top | Edge::Bottom => {
            let (y, h) = half_span(area.y, area.h, edge == Edge::Bottom);
            Rect::new(current.x, y, current.w, h)
        }
    }
}

/// The full half of `area` along `edge`.
pub fn half(area: &Rect, edge: Edge) -> Rect {
    edge_strip(area, area, edge)
}
