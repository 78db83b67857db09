// Integer frame rectangles in host pixel coordinates (origin top-left).

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// A window frame or work-area rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Rect {
    /// Construct a rectangle from origin and size.
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Same size, moved to `(x, y)`.
    #[inline]
    pub fn with_origin(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    /// Same size, centered inside `area`.
    ///
    /// A rectangle larger than `area` ends up overhanging it evenly on both
    /// sides.
    pub fn centered_in(&self, area: &Self) -> Self {
        self.with_origin(
            area.x + (area.w - self.w) / 2,
            area.y + (area.h - self.h) / 2,
        )
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
    }
}

/// Split a length into its `(floor, ceil)` halves.
///
/// For even lengths both halves are equal; for odd lengths they differ by one
/// and sum back to `len`.
#[inline]
pub fn split_len(len: i32) -> (i32, i32) {
    let lo = len.div_euclid(2);
    (lo, len - lo)
}
