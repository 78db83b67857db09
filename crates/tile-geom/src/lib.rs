//! Rectangle math for keypad tiling.
//!
//! Everything here is pure: no host access, no state. The engine feeds in a
//! window's current frame and the usable work area of its monitor and gets
//! back classifications and target rectangles.

mod classify;
mod rect;
mod target;


pub use classify::{CanonicalPosition, is_tiled};
pub use rect::{Rect, split_len};
pub use target::{Corner, Edge, edge_strip, half, quarter};
