//! Accelerator strings in the `<Modifier>...Key` form used by shell key
//! bindings, e.g. `<Super><Alt>KP_1`.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use bitflags::bitflags;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Error;

bitflags! {
    /// Modifier keys held for an accelerator.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
        const META = 1 << 4;
        const HYPER = 1 << 5;
    }
}

/// Canonical rendering order and names.
const MODIFIER_NAMES: &[(Modifiers, &str)] = &[
    (Modifiers::SHIFT, "Shift"),
    (Modifiers::CONTROL, "Control"),
    (Modifiers::ALT, "Alt"),
    (Modifiers::SUPER, "Super"),
    (Modifiers::META, "Meta"),
    (Modifiers::HYPER, "Hyper"),
];

impl Modifiers {
    /// Parse one modifier token (without angle brackets), case-insensitively.
    fn from_token(token: &str) -> Option<Self> {
        Some(match token.to_ascii_lowercase().as_str() {
            "shift" => Self::SHIFT,
            "control" | "ctrl" | "primary" => Self::CONTROL,
            "alt" | "mod1" => Self::ALT,
            "super" | "mod4" => Self::SUPER,
            "meta" => Self::META,
            "hyper" => Self::HYPER,
            _ => return None,
        })
    }
}

/// Whole-string shape: any number of `<Token>` groups then one key name.
static ACCEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:<[A-Za-z0-9]+>)*)([A-Za-z0-9_]+)$").expect("static accelerator regex")
});
static MOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([A-Za-z0-9]+)>").expect("static modifier regex"));

/// A single keystroke plus modifiers, or the disabled (empty) binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Accelerator {
    mods: Modifiers,
    key: Option<String>,
}

impl Accelerator {
    /// The empty accelerator: the action stays unbound.
    pub fn disabled() -> Self {
        Self {
            mods: Modifiers::empty(),
            key: None,
        }
    }

    /// Build from parts.
    pub fn new(mods: Modifiers, key: impl Into<String>) -> Self {
        Self {
            mods,
            key: Some(key.into()),
        }
    }

    /// Parse `text`. An empty or all-whitespace string is the disabled binding.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::disabled());
        }
        let caps = ACCEL_RE
            .captures(text)
            .ok_or_else(|| Error::validation(format!("invalid accelerator '{text}'")))?;
        let mut mods = Modifiers::empty();
        for m in MOD_RE.captures_iter(&caps[1]) {
            let token = &m[1];
            let flag = Modifiers::from_token(token).ok_or_else(|| {
                Error::validation(format!("unknown modifier '<{token}>' in '{text}'"))
            })?;
            mods |= flag;
        }
        Ok(Self::new(mods, &caps[2]))
    }

    pub fn modifiers(&self) -> Modifiers {
        self.mods
    }

    /// Key name, `None` when disabled.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.key.is_none()
    }
}

impl Display for Accelerator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let Some(key) = &self.key else {
            return Ok(());
        };
        for (flag, name) in MODIFIER_NAMES {
            if self.mods.contains(*flag) {
                write!(f, "<{name}>")?;
            }
        }
        write!(f, "{key}")
    }
}

impl FromStr for Accelerator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Accelerator {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Accelerator> for String {
    fn from(value: Accelerator) -> Self {
        value.to_string()
    }
}
