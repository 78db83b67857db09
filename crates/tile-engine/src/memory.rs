//! Side table of the last free rectangle per window.

use std::num::NonZeroUsize;

use lru::LruCache;
use tile_geom::Rect;
use tile_host::WindowId;
use tracing::trace;

/// Upper bound on remembered windows; the least recently stored entry is
/// evicted first.
pub const MEMORY_CAP: usize = 256;

/// Remembered free geometry, consumed by the toggle action.
pub struct RectMemory {
    /// Free rect per window, ordered by when it was stored.
    rects: LruCache<WindowId, Rect>,
}

impl Default for RectMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl RectMemory {
    /// Empty table holding at most [`MEMORY_CAP`] windows.
    pub fn new() -> Self {
        let cap = NonZeroUsize::new(MEMORY_CAP).unwrap_or(NonZeroUsize::MIN);
        Self {
            rects: LruCache::new(cap),
        }
    }

    /// Store `rect` for `id`, replacing any earlier value.
    pub fn remember(&mut self, id: WindowId, rect: Rect) {
        trace!(window = %id, %rect, "memory_store");
        if let Some((evicted, _)) = self.rects.push(id, rect)
            && evicted != id
        {
            trace!(window = %evicted, "memory_evict");
        }
    }

    /// Stored rect for `id`. Does not change eviction order.
    pub fn get(&self, id: WindowId) -> Option<Rect> {
        self.rects.peek(&id).copied()
    }

    /// Whether anything is stored for `id`.
    pub fn contains(&self, id: WindowId) -> bool {
        self.rects.contains(&id)
    }

    /// Remove and return the rectangle for `id`.
    pub fn take(&mut self, id: WindowId) -> Option<Rect> {
        self.rects.pop(&id)
    }

    /// Drop whatever is stored for `id`.
    pub fn forget(&mut self, id: WindowId) {
        self.rects.pop(&id);
    }

    /// Number of remembered windows.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// True when nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
