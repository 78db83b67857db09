//! Built-in values: binding names and their default accelerators.

/// Direct placement actions, one per keypad key.
pub const TILING_KEYBINDINGS: &[&str] = &[
    "kpdivide", "kp0", "kp1", "kp2", "kp3", "kp4", "kp5", "kp6", "kp7", "kp8", "kp9",
];

/// Paired placement plus popup selection, one per keypad key except 5.
pub const COMPLETION_KEYBINDINGS: &[&str] = &[
    "popup-kp1",
    "popup-kp2",
    "popup-kp3",
    "popup-kp4",
    "popup-kp6",
    "popup-kp7",
    "popup-kp8",
    "popup-kp9",
];

/// Every binding name the store knows, tiling first.
pub const ALL_KEYBINDINGS: &[&str] = &[
    "kpdivide",
    "kp0",
    "kp1",
    "kp2",
    "kp3",
    "kp4",
    "kp5",
    "kp6",
    "kp7",
    "kp8",
    "kp9",
    "popup-kp1",
    "popup-kp2",
    "popup-kp3",
    "popup-kp4",
    "popup-kp6",
    "popup-kp7",
    "popup-kp8",
    "popup-kp9",
];

pub const DISABLE_ANIMATIONS: bool = true;
pub const CENTER_WHEN_UNMAXIMIZING: bool = false;

/// Default accelerator text for `name`, `None` for an unknown name.
pub fn default_accelerator(name: &str) -> Option<String> {
    let key = match name {
        "kpdivide" => "KP_Divide".to_string(),
        n if TILING_KEYBINDINGS.contains(&n) => format!("KP_{}", &n[2..]),
        n if COMPLETION_KEYBINDINGS.contains(&n) => {
            return Some(format!("<Super><Alt>KP_{}", &n["popup-kp".len()..]));
        }
        _ => return None,
    };
    Some(format!("<Super>{key}"))
}
