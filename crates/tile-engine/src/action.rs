//! Keypad actions and the binding names that trigger them.

use std::fmt::{Display, Formatter, Result as FmtResult};

use tile_geom::{Corner, Edge};

/// One placement applied to a single window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Keypad divide: maximize both axes.
    Maximize,
    /// Keypad 0.
    Minimize,
    /// Keypad 1, 3, 7, 9: a quarter of the usable area.
    Quarter(Corner),
    /// Keypad 2, 4, 6, 8: a half of the usable area, reached through a strip
    /// plus a maximize of the other axis.
    Edge(Edge),
    /// Keypad 5: maximize a free window, otherwise restore it.
    Toggle,
}

impl Action {
    /// Action for a keypad key label (`"divide"`, `"0"` .. `"9"`).
    pub fn from_keypad(key: &str) -> Option<Self> {
        Some(match key {
            "divide" => Self::Maximize,
            "0" => Self::Minimize,
            "1" => Self::Quarter(Corner::BottomLeft),
            "2" => Self::Edge(Edge::Bottom),
            "3" => Self::Quarter(Corner::BottomRight),
            "4" => Self::Edge(Edge::Left),
            "5" => Self::Toggle,
            "6" => Self::Edge(Edge::Right),
            "7" => Self::Quarter(Corner::TopLeft),
            "8" => Self::Edge(Edge::Top),
            "9" => Self::Quarter(Corner::TopRight),
            _ => return None,
        })
    }

    /// The placement paired with this one in a popup gesture: the other half,
    /// or the quarter stacked on the same side.
    pub fn partner(self) -> Option<Self> {
        Some(match self {
            Self::Quarter(c) => Self::Quarter(match c {
                Corner::TopLeft => Corner::BottomLeft,
                Corner::BottomLeft => Corner::TopLeft,
                Corner::TopRight => Corner::BottomRight,
                Corner::BottomRight => Corner::TopRight,
            }),
            Self::Edge(e) => Self::Edge(match e {
                Edge::Left => Edge::Right,
                Edge::Right => Edge::Left,
                Edge::Top => Edge::Bottom,
                Edge::Bottom => Edge::Top,
            }),
            Self::Maximize | Self::Minimize | Self::Toggle => return None,
        })
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Maximize => f.write_str("maximize"),
            Self::Minimize => f.write_str("minimize"),
            Self::Quarter(c) => write!(f, "quarter({c:?})"),
            Self::Edge(e) => write!(f, "half({e:?})"),
            Self::Toggle => f.write_str("toggle"),
        }
    }
}

/// What a binding name triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    /// Apply one action to the focused window.
    Tile(Action),
    /// Apply `first` to the focused window and offer `second` for another
    /// window through the selection popup.
    Paired {
        /// Placement for the focused window.
        first: Action,
        /// Placement for the chosen window.
        second: Action,
    },
}

impl Binding {
    /// Resolve a binding name such as `kp7` or `popup-kp4`.
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(key) = name.strip_prefix("popup-kp") {
            let first = Action::from_keypad(key)?;
            let second = first.partner()?;
            return Some(Self::Paired { first, second });
        }
        name.strip_prefix("kp")
            .and_then(Action::from_keypad)
            .map(Self::Tile)
    }
}
