//! Keyboard input model.
//!
//! Browser `KeyboardEvent.key` strings are folded into the handful of keys the
//! navigation cares about. Everything else collapses into [`Key::Other`] so the
//! controller can match exhaustively.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// A keyboard key relevant to menu navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Activates the focused toggle.
    Enter,
    /// Activates the focused toggle.
    Space,
    /// Closes the open menu.
    Escape,
    /// Moves focus; wraps inside the open menu.
    Tab,
    /// Any key the navigation ignores.
    Other,
}

impl Key {
    /// Map a browser key name (e.g. `"Escape"`, `" "`) to a [`Key`].
    #[must_use]
    pub fn from_browser(name: &str) -> Self {
        match name {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            _ => Self::Other,
        }
    }

    /// Whether this key activates a focused button-like control.
    #[must_use]
    pub fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// A key press with the modifier state the navigation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    /// Shift is held; reverses Tab direction.
    pub shift: bool,
}

impl KeyPress {
    #[must_use]
    pub fn new(key: Key, shift: bool) -> Self {
        Self { key, shift }
    }

    /// Build from a raw browser key name.
    #[must_use]
    pub fn from_browser(name: &str, shift: bool) -> Self {
        Self::new(Key::from_browser(name), shift)
    }
}
