use std::collections::BTreeMap;

use serde::Deserialize;

/// On-disk shape of the settings file. Every field is optional and merges
/// over the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    #[serde(default)]
    pub disable_animations: Option<bool>,
    #[serde(default)]
    pub center_when_unmaximizing: Option<bool>,
    /// Binding name to accelerator text; an empty string disables the binding.
    #[serde(default)]
    pub keybindings: BTreeMap<String, String>,
}
