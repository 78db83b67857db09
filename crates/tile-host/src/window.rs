use bitflags::bitflags;
use tile_geom::Rect;

bitflags! {
    /// Maximize axes, matching the host's flag values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MaxFlags: u8 {
        /// Maximized horizontally (full usable width).
        const HORIZONTAL = 1;
        /// Maximized vertically (full usable height).
        const VERTICAL = 2;
        /// Both axes.
        const BOTH = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

/// Snapshot of the window attributes the engine reads in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    /// Current frame rectangle.
    pub frame: Rect,
    /// Currently maximized axes.
    pub maximized: MaxFlags,
    /// Whether the window is minimized.
    pub minimized: bool,
    /// Whether the window can be resized at all.
    pub resizeable: bool,
    /// Whether the window can be maximized.
    pub can_maximize: bool,
    /// Whether the window can be minimized.
    pub can_minimize: bool,
}

impl WindowState {
    /// A plain, free, fully capable window at `frame`.
    pub fn normal(frame: Rect) -> Self {
        Self {
            frame,
            maximized: MaxFlags::empty(),
            minimized: false,
            resizeable: true,
            can_maximize: true,
            can_minimize: true,
        }
    }

    /// True when maximized on both axes.
    #[inline]
    pub fn is_fully_maximized(&self) -> bool {
        self.maximized.contains(MaxFlags::BOTH)
    }
}
