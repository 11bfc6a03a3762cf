//! Focus containment for the open mobile menu.

#[cfg(test)]
#[path = "focus_test.rs"]
mod focus_test;

/// Where Tab should send focus, if the default order must be overridden.
///
/// `count` is the number of focusable elements inside the menu and `current`
/// the position of the focused element among them (`None` when focus is
/// elsewhere). Returns the index to focus, in which case the browser's own
/// Tab handling must be suppressed; `None` leaves Tab alone.
#[must_use]
pub fn wrap_target(count: usize, current: Option<usize>, backwards: bool) -> Option<usize> {
    let last = count.checked_sub(1)?;
    match (current, backwards) {
        (Some(0), true) => Some(last),
        (Some(i), false) if i == last => Some(0),
        _ => None,
    }
}
