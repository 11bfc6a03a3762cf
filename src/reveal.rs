//! Entrance animation for content cards.
//!
//! Cards start hidden and shifted down; the first time one intersects the
//! viewport it fades and slides into place. A card is revealed at most once.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use crate::consts::{REVEAL_OFFSET_PX, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD, REVEAL_TRANSITION};

/// Inline style properties applied to a card, as `(property, value)` pairs.
pub type StyleSet = Vec<(&'static str, String)>;

/// Styles a card gets before it has been seen.
#[must_use]
pub fn hidden_styles() -> StyleSet {
    vec![
        ("opacity", "0".to_owned()),
        ("transform", format!("translateY({REVEAL_OFFSET_PX}px)")),
        ("transition", REVEAL_TRANSITION.to_owned()),
    ]
}

/// Styles that bring a card to its resting place.
#[must_use]
pub fn revealed_styles() -> StyleSet {
    vec![("opacity", "1".to_owned()), ("transform", "translateY(0)".to_owned())]
}

/// `IntersectionObserver` options for card reveals.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self { threshold: REVEAL_THRESHOLD, root_margin: REVEAL_ROOT_MARGIN }
    }
}

/// Tracks which observed cards have been revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { revealed: vec![false; count] }
    }

    /// Record an intersection report for card `index`.
    ///
    /// Returns `true` only on the first report that says the card is
    /// intersecting; the caller applies [`revealed_styles`] and stops
    /// observing it. Unknown indices are ignored.
    pub fn observe(&mut self, index: usize, intersecting: bool) -> bool {
        match self.revealed.get_mut(index) {
            Some(seen) if intersecting && !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }

    /// Every card has been revealed; the observer can be disconnected.
    #[must_use]
    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(|r| *r)
    }
}
