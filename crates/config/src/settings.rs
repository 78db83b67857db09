use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    Accelerator, Error,
    defaults::{self, ALL_KEYBINDINGS},
    raw::RawSettings,
};

/// Effective settings: behavior flags plus one accelerator per known binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Turn desktop animations off while a placement runs.
    pub disable_animations: bool,
    /// Center a window on its work area when toggling it out of a tiled state.
    pub center_when_unmaximizing: bool,
    /// One accelerator per known binding name.
    pub keybindings: BTreeMap<String, Accelerator>,
}

impl Default for Settings {
    fn default() -> Self {
        let keybindings = ALL_KEYBINDINGS
            .iter()
            .map(|name| {
                let accel = defaults::default_accelerator(name)
                    .and_then(|text| Accelerator::parse(&text).ok())
                    .unwrap_or_else(Accelerator::disabled);
                ((*name).to_string(), accel)
            })
            .collect();
        Self {
            disable_animations: defaults::DISABLE_ANIMATIONS,
            center_when_unmaximizing: defaults::CENTER_WHEN_UNMAXIMIZING,
            keybindings,
        }
    }
}

impl Settings {
    /// Accelerator for `name`; `None` for names the store does not know.
    pub fn accelerator(&self, name: &str) -> Option<&Accelerator> {
        self.keybindings.get(name)
    }

    /// All bindings in name order.
    pub fn keybindings(&self) -> impl Iterator<Item = (&str, &Accelerator)> {
        self.keybindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Replace the accelerator for a known binding name.
    pub fn set_accelerator(&mut self, name: &str, text: &str) -> Result<(), Error> {
        let Some(slot) = self.keybindings.get_mut(name) else {
            return Err(Error::validation(format!(
                "can't change keybinding: unknown name '{name}'"
            )));
        };
        *slot = Accelerator::parse(text)?;
        debug!(name, accel = %slot, "keybinding changed");
        Ok(())
    }

    pub(crate) fn from_raw(raw: RawSettings) -> Result<Self, Error> {
        let mut s = Self::default();
        if let Some(v) = raw.disable_animations {
            s.disable_animations = v;
        }
        if let Some(v) = raw.center_when_unmaximizing {
            s.center_when_unmaximizing = v;
        }
        for (name, text) in &raw.keybindings {
            s.set_accelerator(name, text)?;
        }
        Ok(s)
    }
}
