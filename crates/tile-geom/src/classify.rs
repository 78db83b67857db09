use serde::{Deserialize, Serialize};

use crate::rect::{Rect, split_len};

/// The nine canonical tiled placements relative to a usable area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalPosition {
    /// Covers the whole usable area.
    Full,
    /// Left half, full height.
    LeftHalf,
    /// Right half, full height.
    RightHalf,
    /// Top half, full width.
    TopHalf,
    /// Bottom half, full width.
    BottomHalf,
    /// Top-left quarter.
    TopLeftQ,
    /// Top-right quarter.
    TopRightQ,
    /// Bottom-left quarter.
    BottomLeftQ,
    /// Bottom-right quarter.
    BottomRightQ,
}

/// Where a span sits along one axis of the usable area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Full,
    First,
    Second,
}

/// Place `(start, len)` into a slot of `(area_start, area_len)`, accepting
/// both the floor and ceil half for odd lengths.
fn axis_slot(start: i32, len: i32, area_start: i32, area_len: i32) -> Option<Slot> {
    let (lo, hi) = split_len(area_len);
    let half_len = len == lo || len == hi;
    if start == area_start && len == area_len {
        Some(Slot::Full)
    } else if start == area_start && half_len {
        Some(Slot::First)
    } else if (start == area_start + lo || start == area_start + hi) && half_len {
        Some(Slot::Second)
    } else {
        None
    }
}

impl CanonicalPosition {
    /// Classify `current` against `usable`, or `None` for a free rectangle.
    pub fn classify(current: &Rect, usable: &Rect) -> Option<Self> {
        let xs = axis_slot(current.x, current.w, usable.x, usable.w)?;
        let ys = axis_slot(current.y, current.h, usable.y, usable.h)?;
        Some(match (xs, ys) {
            (Slot::Full, Slot::Full) => Self::Full,
            (Slot::First, Slot::Full) => Self::LeftHalf,
            (Slot::Second, Slot::Full) => Self::RightHalf,
            (Slot::Full, Slot::First) => Self::TopHalf,
            (Slot::Full, Slot::Second) => Self::BottomHalf,
            (Slot::First, Slot::First) => Self::TopLeftQ,
            (Slot::Second, Slot::First) => Self::TopRightQ,
            (Slot::First, Slot::Second) => Self::BottomLeftQ,
            (Slot::Second, Slot::Second) => Self::BottomRightQ,
        })
    }
}

/// Admissible values for one component: the full-span value and both halves.
#[inline]
fn admissible(full: i32, base: i32, len: i32) -> [i32; 3] {
    let (lo, hi) = split_len(len);
    [full, base + lo, base + hi]
}

/// Return true when each of `current`'s x, y, width and height is one of the
/// values a tiled window can take inside `usable`.
///
/// Components are checked independently, so a few non-canonical combinations
/// (e.g. a full-width window starting at the horizontal midpoint) also read as
/// tiled. That tolerance is what keeps remembered geometry from being
/// overwritten by rounding artifacts.
pub fn is_tiled(current: &Rect, usable: &Rect) -> bool {
    admissible(usable.x, usable.x, usable.w).contains(&current.x)
        && admissible(usable.y, usable.y, usable.h).contains(&current.y)
        && admissible(usable.w, 0, usable.w).contains(&current.w)
        && admissible(usable.h, 0, usable.h).contains(&current.h)
}
