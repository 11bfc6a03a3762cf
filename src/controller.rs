use crate::config::NavConfig;
use crate::focus::wrap_target;
use crate::input::{Key, KeyPress};
use crate::menu::{MenuEffect, MenuEvent, MenuState, dispatch};
use crate::scroll::target_offset;
use crate::sections::{HeaderShadow, SectionBounds, link_for_section};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// DOM mutations returned from event handlers for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Suppress the browser's default handling of the current event.
    PreventDefault,
    /// Open classes on, `aria-expanded="true"`, body overflow hidden.
    ShowMenu,
    /// Open classes off, `aria-expanded="false"`, body overflow cleared.
    HideMenu,
    /// Clear the active class from every link, then set it on this one.
    SetActiveLink(Option<usize>),
    SetHeaderShadow(HeaderShadow),
    /// Native smooth scroll to `top`.
    ScrollTo { top: f64 },
    /// Frame-driven eased scroll from the current offset to `to`.
    AnimateScroll { to: f64, duration_ms: f64 },
    /// Focus the menu's focusable element at this index.
    FocusMenuItem(usize),
}

/// Browser features the controller adapts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// `scroll-behavior: smooth` is honored by `scrollTo`.
    pub smooth_scroll: bool,
    /// `IntersectionObserver` exists.
    pub intersection_observer: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { smooth_scroll: true, intersection_observer: true }
    }
}

/// Measurements needed to scroll to a link's target section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionTarget {
    /// `offsetTop` of the target element.
    pub top: f64,
    /// Rendered height of the fixed header.
    pub header_height: f64,
}

/// Focus position inside the open menu at the time of a Tab press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusSnapshot {
    /// Number of focusable elements in the menu.
    pub count: usize,
    /// Index of the focused element among them, if focus is inside.
    pub current: Option<usize>,
}

/// Navigation state and logic, independent of the browser.
///
/// Separated from [`crate::dom::Controller`] so it can be tested without
/// WASM/browser dependencies. Every handler returns the [`Effect`]s the DOM
/// layer must apply, in order.
pub struct NavCore {
    config: NavConfig,
    caps: Capabilities,
    menu: MenuState,
    /// `href` attribute of each navigation link, in document order.
    hrefs: Vec<Option<String>>,
    active: Option<usize>,
}

impl NavCore {
    #[must_use]
    pub fn new(config: NavConfig, caps: Capabilities, hrefs: Vec<Option<String>>) -> Self {
        Self { config, caps, menu: MenuState::Closed, hrefs, active: None }
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    #[must_use]
    pub fn menu(&self) -> MenuState {
        self.menu
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.menu.is_open()
    }

    /// Index of the link carrying the active class, if any.
    #[must_use]
    pub fn active_link(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn link_count(&self) -> usize {
        self.hrefs.len()
    }

    /// Fragment id of link `index` when it points into this page.
    #[must_use]
    pub fn internal_target(&self, index: usize) -> Option<&str> {
        self.hrefs.get(index)?.as_deref()?.strip_prefix('#')
    }

    /// Whether `press` would be handled by the focus trap right now.
    #[must_use]
    pub fn traps(&self, press: KeyPress) -> bool {
        press.key == Key::Tab && self.is_open()
    }

    // --- Menu ---

    /// Flip the menu between open and closed.
    pub fn toggle(&mut self) -> Vec<Effect> {
        self.feed(MenuEvent::ToggleActivated)
    }

    /// Close the menu whatever its current state.
    pub fn close(&mut self) -> Vec<Effect> {
        self.menu = MenuState::Closed;
        vec![Effect::HideMenu]
    }

    /// Keydown on the toggle control. Enter and Space toggle.
    pub fn on_toggle_key(&mut self, press: KeyPress) -> Vec<Effect> {
        if !press.key.activates() {
            return Vec::new();
        }
        let mut effects = vec![Effect::PreventDefault];
        effects.extend(self.toggle());
        effects
    }

    /// Click anywhere in the document; `inside_nav` when the target is within
    /// the menu or the toggle.
    pub fn on_document_click(&mut self, inside_nav: bool) -> Vec<Effect> {
        if inside_nav {
            return Vec::new();
        }
        self.feed(MenuEvent::OutsideClick)
    }

    /// Keydown anywhere in the document.
    ///
    /// `focus` is only consulted for Tab while the menu is open; pass `None`
    /// otherwise.
    pub fn on_key(&mut self, press: KeyPress, focus: Option<FocusSnapshot>) -> Vec<Effect> {
        match press.key {
            Key::Escape => self.feed(MenuEvent::EscapePressed),
            Key::Tab if self.is_open() => {
                let Some(focus) = focus else {
                    return Vec::new();
                };
                match wrap_target(focus.count, focus.current, press.shift) {
                    Some(index) => vec![Effect::FocusMenuItem(index), Effect::PreventDefault],
                    None => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    /// The viewport changed width.
    pub fn on_resize(&mut self, width: f64) -> Vec<Effect> {
        self.feed(MenuEvent::Resized { width })
    }

    // --- Links ---

    /// Click on navigation link `index`.
    ///
    /// Links that do not start with `#` are left to the browser. For internal
    /// links the menu closes; if `locate` finds the target section the page
    /// scrolls to it and the clicked link becomes active.
    pub fn on_link_click(&mut self, index: usize, locate: impl FnOnce(&str) -> Option<SectionTarget>) -> Vec<Effect> {
        let Some(target_id) = self.internal_target(index) else {
            return Vec::new();
        };
        let target = locate(target_id);

        let mut effects = vec![Effect::PreventDefault];
        effects.extend(self.feed(MenuEvent::InternalLinkClicked));

        let Some(target) = target else {
            log::debug!("link {index} targets a missing section");
            return effects;
        };
        let top = target_offset(target.top, target.header_height);
        effects.push(if self.caps.smooth_scroll {
            Effect::ScrollTo { top }
        } else {
            Effect::AnimateScroll { to: top, duration_ms: self.config.scroll_duration_ms }
        });
        effects.push(self.set_active(Some(index)));
        effects
    }

    // --- Scroll ---

    /// Recompute the active link from the scroll offset.
    pub fn sync_active(&mut self, scroll_y: f64, sections: &[SectionBounds]) -> Vec<Effect> {
        let current = self
            .config
            .probe()
            .current(scroll_y, sections)
            .and_then(|id| link_for_section(&self.hrefs, id));
        vec![self.set_active(current)]
    }

    /// Settled scroll: active link first, then header shadow.
    pub fn on_scroll(&mut self, scroll_y: f64, sections: &[SectionBounds]) -> Vec<Effect> {
        let mut effects = self.sync_active(scroll_y, sections);
        let shadow = HeaderShadow::for_scroll(scroll_y, self.config.shadow_threshold_px);
        effects.push(Effect::SetHeaderShadow(shadow));
        effects
    }

    // --- Internal ---

    fn feed(&mut self, event: MenuEvent) -> Vec<Effect> {
        let transition = dispatch(self.menu, event, self.config.breakpoint_px);
        if transition.next != self.menu {
            log::debug!("menu {:?} -> {:?} on {event:?}", self.menu, transition.next);
        }
        self.menu = transition.next;
        match transition.effect {
            MenuEffect::Open => vec![Effect::ShowMenu],
            MenuEffect::Close => vec![Effect::HideMenu],
            MenuEffect::Nothing => Vec::new(),
        }
    }

    fn set_active(&mut self, index: Option<usize>) -> Effect {
        self.active = index.filter(|i| *i < self.hrefs.len());
        Effect::SetActiveLink(self.active)
    }
}
