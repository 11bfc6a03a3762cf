//! Mobile menu state machine.
//!
//! The menu has two states and a fixed set of events. [`dispatch`] is the
//! complete transition table: every `(state, event)` pair maps to the next
//! state and the side effect the browser layer must apply. Nothing else is
//! allowed to change the menu state.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

/// Whether the mobile menu is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    #[must_use]
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

/// Something that may change the menu state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    /// Click on the toggle, or Enter/Space while it has focus.
    ToggleActivated,
    /// Click on a same-page navigation link.
    InternalLinkClicked,
    /// Click anywhere outside both the menu and the toggle.
    OutsideClick,
    /// Escape pressed anywhere in the document.
    EscapePressed,
    /// The viewport was resized to `width` CSS pixels.
    Resized { width: f64 },
}

/// DOM work implied by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEffect {
    /// Show the menu: classes on, `aria-expanded="true"`, body scroll locked.
    Open,
    /// Hide the menu: classes off, `aria-expanded="false"`, body scroll unlocked.
    Close,
    /// Leave the DOM alone.
    Nothing,
}

/// Result of feeding one event into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: MenuState,
    pub effect: MenuEffect,
}

impl Transition {
    fn to(next: MenuState, effect: MenuEffect) -> Self {
        Self { next, effect }
    }

    fn stay(state: MenuState) -> Self {
        Self { next: state, effect: MenuEffect::Nothing }
    }
}

/// Transition table for the menu.
///
/// Link clicks close unconditionally, so they emit [`MenuEffect::Close`] even
/// from [`MenuState::Closed`]; closing is idempotent. The other closing events
/// only act while the menu is open. Resizes close only past `breakpoint_px`.
#[must_use]
pub fn dispatch(state: MenuState, event: MenuEvent, breakpoint_px: f64) -> Transition {
    use MenuEffect as E;
    use MenuState as S;

    match (state, event) {
        (S::Closed, MenuEvent::ToggleActivated) => Transition::to(S::Open, E::Open),
        (S::Open, MenuEvent::ToggleActivated) => Transition::to(S::Closed, E::Close),

        (_, MenuEvent::InternalLinkClicked) => Transition::to(S::Closed, E::Close),

        (S::Open, MenuEvent::OutsideClick | MenuEvent::EscapePressed) => Transition::to(S::Closed, E::Close),
        (S::Open, MenuEvent::Resized { width }) if width > breakpoint_px => Transition::to(S::Closed, E::Close),

        (S::Open, MenuEvent::Resized { .. })
        | (S::Closed, MenuEvent::OutsideClick | MenuEvent::EscapePressed | MenuEvent::Resized { .. }) => {
            Transition::stay(state)
        }
    }
}
