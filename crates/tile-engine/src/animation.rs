//! Temporary suppression of desktop animations during a gesture.

use tile_host::AnimationPrefs;
use tracing::debug;

/// What the engine changed about the animation preference, so that it can
/// be put back exactly: reset when it was following the default, set
/// explicitly when it was set explicitly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    changed: bool,
    was_default: bool,
}

impl AnimationState {
    /// Switch animations off if `enabled` and they are currently on.
    /// Nested calls leave the first record alone.
    pub fn suspend(&mut self, prefs: &dyn AnimationPrefs, enabled: bool) {
        if !enabled || !prefs.enabled() {
            return;
        }
        self.was_default = !prefs.is_user_set();
        prefs.set_enabled(false);
        self.changed = true;
        debug!(was_default = self.was_default, "animations_suspended");
    }

    /// Undo a previous [`Self::suspend`]. A no-op when nothing was changed.
    pub fn restore(&mut self, prefs: &dyn AnimationPrefs) {
        if !self.changed {
            return;
        }
        if self.was_default {
            prefs.reset();
        } else {
            prefs.set_enabled(true);
        }
        debug!(was_default = self.was_default, "animations_restored");
        *self = Self::default();
    }

    /// True while a suspension is outstanding.
    pub fn is_suspended(&self) -> bool {
        self.changed
    }
}

#[cfg(test)]
mod tests {
    use tile_geom::Rect;
    use tile_host::mock::MockHost;

    use super::*;

    fn host() -> MockHost {
        MockHost::new(Rect::new(0, 0, 100, 100))
    }

    #[test]
    fn default_pref_is_reset() {
        let h = host();
        let mut s = AnimationState::default();
        s.suspend(&h, true);
        assert_eq!(h.animation_pref(), (false, true));
        s.restore(&h);
        assert_eq!(h.animation_pref(), (true, false));
        assert!(!s.is_suspended());
    }

    #[test]
    fn explicit_pref_is_set_back() {
        let h = host();
        h.set_animation_pref(true, true);
        let mut s = AnimationState::default();
        s.suspend(&h, true);
        s.suspend(&h, true);
        s.restore(&h);
        assert_eq!(h.animation_pref(), (true, true));
    }

    #[test]
    fn untouched_when_disabled_or_already_off() {
        let h = host();
        let mut s = AnimationState::default();
        s.suspend(&h, false);
        assert!(!s.is_suspended());
        h.set_animation_pref(false, true);
        s.suspend(&h, true);
        s.restore(&h);
        assert_eq!(h.animation_pref(), (false, true));
    }
}
