//! Browser binding for [`NavCore`].
//!
//! Looks up the page elements, registers event listeners, feeds each event
//! into the core, and applies the returned [`Effect`]s with `web-sys`. No
//! navigation decisions are made here.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, ErrorEvent, Event, EventTarget, HtmlElement, HtmlHeadElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, Node, NodeList, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::config::{CONFIG_ELEMENT_ID, NavConfig};
use crate::consts::FOCUSABLE_SELECTOR;
use crate::controller::{Capabilities, Effect, FocusSnapshot, NavCore, SectionTarget};
use crate::error::{NavError, Result};
use crate::guard::FallbackLatch;
use crate::input::KeyPress;
use crate::reveal::{ObserverOptions, RevealTracker, StyleSet, hidden_styles, revealed_styles};
use crate::scroll::ScrollAnimation;
use crate::sections::SectionBounds;
use crate::throttle::{Throttle, TimeoutScheduler};

// =============================================================
// Startup
// =============================================================

/// Install the error listener, then mount everything once the DOM is ready.
pub fn boot(window: Window, config: NavConfig) -> Result<()> {
    let latch = Rc::new(FallbackLatch::new());
    install_error_listener(&window, &config, Rc::clone(&latch))?;

    let document = window.document().ok_or_else(|| NavError::missing("document"))?;
    if document.ready_state() != "loading" {
        mount_all(&window, config, &latch);
        return Ok(());
    }

    let mut pending = Some((window, config));
    listen(&document, "DOMContentLoaded", move |_| {
        if let Some((window, config)) = pending.take() {
            mount_all(&window, config, &latch);
        }
    })
}

fn mount_all(window: &Window, config: NavConfig, latch: &FallbackLatch) {
    let caps = Capabilities::detect(window);
    log::debug!("browser capabilities: {caps:?}");

    if caps.intersection_observer {
        match mount_reveal(window, &config.reveal_selector) {
            Ok(count) => log::debug!("observing {count} cards for entrance animation"),
            Err(err) => log::warn!("entrance animation unavailable: {err}"),
        }
    }

    if !latch.mark_live() {
        log::info!("fallback toggle already attached; navigation stays degraded");
        return;
    }
    match Controller::mount(window, config.clone(), caps) {
        Ok(controller) => log::debug!("navigation mounted with {} links", controller.link_count()),
        Err(err) => {
            latch.stand_down();
            log::warn!("navigation unavailable: {err}");
            report("fallback toggle", install_fallback(window, &config, latch).map(|_| ()));
        }
    }
}

/// Read the optional inline config block.
#[must_use]
pub fn read_config(window: &Window) -> NavConfig {
    let raw = window
        .document()
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    NavConfig::from_optional_json(raw.as_deref())
}

impl Capabilities {
    /// Probe the running browser.
    #[must_use]
    pub fn detect(window: &Window) -> Self {
        let smooth_scroll = window
            .document()
            .and_then(|doc| doc.document_element())
            .and_then(|root| root.dyn_ref::<HtmlElement>().map(HtmlElement::style))
            .is_some_and(|style| has_property(&style, "scrollBehavior"));
        let intersection_observer = has_property(window, "IntersectionObserver");
        Self { smooth_scroll, intersection_observer }
    }
}

// =============================================================
// Controller
// =============================================================

struct Elements {
    window: Window,
    document: Document,
    head: HtmlHeadElement,
    body: HtmlElement,
    toggle: HtmlElement,
    menu: HtmlElement,
    header: HtmlElement,
    links: Vec<HtmlElement>,
}

impl Elements {
    /// Resolve every element the controller touches; fails before any
    /// listener is registered.
    fn lookup(window: &Window, config: &NavConfig) -> Result<Self> {
        let document = window.document().ok_or_else(|| NavError::missing("document"))?;
        let head = document.head().ok_or_else(|| NavError::missing("head"))?;
        let body = document.body().ok_or_else(|| NavError::missing("body"))?;
        let toggle = by_id(&document, &config.toggle_id)?;
        let menu = by_id(&document, &config.menu_id)?;
        let header = by_selector(&document, &config.header_selector)?;
        let links = html_elements(&document.query_selector_all(&config.link_selector)?);
        Ok(Self { window: window.clone(), document, head, body, toggle, menu, header, links })
    }
}

/// The mounted navigation controller.
///
/// Listeners hold `Rc` clones, so the controller lives as long as the page.
pub struct Controller {
    el: Elements,
    config: NavConfig,
    core: RefCell<NavCore>,
}

impl Controller {
    /// Wire the navigation to the page.
    ///
    /// Every step that can fail runs before the first listener is bound, and
    /// the toggle click is bound last, so a failed mount leaves no controller
    /// click handler on the toggle.
    pub fn mount(window: &Window, config: NavConfig, caps: Capabilities) -> Result<Rc<Self>> {
        let el = Elements::lookup(window, &config)?;
        let hrefs = el.links.iter().map(|link| link.get_attribute("href")).collect();
        let core = NavCore::new(config.clone(), caps, hrefs);
        let controller = Rc::new(Self { el, config, core: RefCell::new(core) });

        controller.sync_initial()?;
        controller.inject_active_style()?;
        controller.init_aria()?;

        controller.bind_links()?;
        controller.bind_document()?;
        controller.bind_window()?;
        controller.bind_toggle()?;
        Ok(controller)
    }

    #[must_use]
    pub fn link_count(&self) -> usize {
        self.el.links.len()
    }

    // --- Listeners ---

    fn bind_toggle(self: &Rc<Self>) -> Result<()> {
        let ctl = Rc::clone(self);
        listen(&self.el.toggle, "keydown", move |event| {
            let Some(press) = key_press(&event) else {
                return;
            };
            let effects = ctl.core.borrow_mut().on_toggle_key(press);
            report("toggle key", ctl.apply(effects, Some(&event), &[]));
        })?;

        let ctl = Rc::clone(self);
        listen(&self.el.toggle, "click", move |event| {
            let effects = ctl.core.borrow_mut().toggle();
            report("toggle", ctl.apply(effects, Some(&event), &[]));
        })
    }

    fn bind_links(self: &Rc<Self>) -> Result<()> {
        for (index, link) in self.el.links.iter().enumerate() {
            let ctl = Rc::clone(self);
            listen(link, "click", move |event| {
                let effects = ctl.core.borrow_mut().on_link_click(index, |id| ctl.locate(id));
                report("link", ctl.apply(effects, Some(&event), &[]));
            })?;
        }
        Ok(())
    }

    fn bind_document(self: &Rc<Self>) -> Result<()> {
        let ctl = Rc::clone(self);
        listen(&self.el.document, "click", move |event| {
            let inside = event_node(&event).is_some_and(|node| ctl.is_inside_nav(&node));
            let effects = ctl.core.borrow_mut().on_document_click(inside);
            report("outside click", ctl.apply(effects, Some(&event), &[]));
        })?;

        let ctl = Rc::clone(self);
        listen(&self.el.document, "keydown", move |event| {
            let Some(press) = key_press(&event) else {
                return;
            };
            report("keydown", ctl.on_document_key(press, &event));
        })
    }

    fn bind_window(self: &Rc<Self>) -> Result<()> {
        let ctl = Rc::clone(self);
        let throttle = Throttle::new(TimeoutScheduler, self.config.throttle_ms, move || {
            report("scroll", ctl.on_scroll_settled());
        });
        listen(&self.el.window, "scroll", move |_| throttle.trigger())?;

        let ctl = Rc::clone(self);
        listen(&self.el.window, "resize", move |_| {
            report("resize", ctl.on_resize());
        })
    }

    // --- Handlers ---

    fn on_document_key(&self, press: KeyPress, event: &Event) -> Result<()> {
        let traps = self.core.borrow().traps(press);
        let focusables = if traps { self.menu_focusables()? } else { Vec::new() };
        let snapshot = traps.then(|| FocusSnapshot { count: focusables.len(), current: self.focused_index(&focusables) });
        let effects = self.core.borrow_mut().on_key(press, snapshot);
        self.apply(effects, Some(event), &focusables)
    }

    fn on_scroll_settled(&self) -> Result<()> {
        let scroll_y = self.el.window.scroll_y()?;
        let sections = self.sections()?;
        let effects = self.core.borrow_mut().on_scroll(scroll_y, &sections);
        self.apply(effects, None, &[])
    }

    fn on_resize(&self) -> Result<()> {
        let Some(width) = self.el.window.inner_width()?.as_f64() else {
            return Ok(());
        };
        let effects = self.core.borrow_mut().on_resize(width);
        self.apply(effects, None, &[])
    }

    // --- Mount steps ---

    fn sync_initial(&self) -> Result<()> {
        let scroll_y = self.el.window.scroll_y()?;
        let sections = self.sections()?;
        let effects = self.core.borrow_mut().sync_active(scroll_y, &sections);
        self.apply(effects, None, &[])
    }

    fn inject_active_style(&self) -> Result<()> {
        let style = self.el.document.create_element("style")?;
        style.set_text_content(Some(&self.config.active_link_css()));
        self.el.head.append_child(&style)?;
        Ok(())
    }

    fn init_aria(&self) -> Result<()> {
        self.el.toggle.set_attribute("aria-expanded", "false")?;
        self.el.toggle.set_attribute("aria-controls", &self.config.menu_id)?;
        self.el.menu.set_attribute("aria-labelledby", &self.config.toggle_id)?;
        Ok(())
    }

    // --- Effects ---

    fn apply(&self, effects: Vec<Effect>, event: Option<&Event>, focusables: &[HtmlElement]) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::PreventDefault => {
                    if let Some(event) = event {
                        event.prevent_default();
                    }
                }
                Effect::ShowMenu => self.set_menu_open(true)?,
                Effect::HideMenu => self.set_menu_open(false)?,
                Effect::SetActiveLink(index) => self.set_active_link(index)?,
                Effect::SetHeaderShadow(shadow) => {
                    self.el.header.style().set_property("box-shadow", shadow.css())?;
                }
                Effect::ScrollTo { top } => {
                    let options = ScrollToOptions::new();
                    options.set_top(top);
                    options.set_behavior(ScrollBehavior::Smooth);
                    self.el.window.scroll_to_with_scroll_to_options(&options);
                }
                Effect::AnimateScroll { to, duration_ms } => animate_scroll(&self.el.window, to, duration_ms)?,
                Effect::FocusMenuItem(index) => {
                    if let Some(item) = focusables.get(index) {
                        item.focus()?;
                    }
                }
            }
        }
        Ok(())
    }

    fn set_menu_open(&self, open: bool) -> Result<()> {
        self.el.menu.class_list().toggle_with_force(&self.config.open_class, open)?;
        self.el.toggle.class_list().toggle_with_force(&self.config.toggle_active_class, open)?;
        self.el.toggle.set_attribute("aria-expanded", if open { "true" } else { "false" })?;
        self.el.body.style().set_property("overflow", if open { "hidden" } else { "" })?;
        Ok(())
    }

    fn set_active_link(&self, index: Option<usize>) -> Result<()> {
        for (i, link) in self.el.links.iter().enumerate() {
            link.class_list().toggle_with_force(&self.config.link_active_class, Some(i) == index)?;
        }
        Ok(())
    }

    // --- Queries ---

    fn locate(&self, id: &str) -> Option<SectionTarget> {
        let target = self.el.document.get_element_by_id(id)?;
        let target = target.dyn_ref::<HtmlElement>()?;
        Some(SectionTarget {
            top: f64::from(target.offset_top()),
            header_height: f64::from(self.el.header.offset_height()),
        })
    }

    fn sections(&self) -> Result<Vec<SectionBounds>> {
        let list = self.el.document.query_selector_all(&self.config.section_selector)?;
        Ok(html_elements(&list)
            .into_iter()
            .map(|s| SectionBounds::new(s.id(), f64::from(s.offset_top()), f64::from(s.offset_height())))
            .collect())
    }

    fn menu_focusables(&self) -> Result<Vec<HtmlElement>> {
        Ok(html_elements(&self.el.menu.query_selector_all(FOCUSABLE_SELECTOR)?))
    }

    fn focused_index(&self, focusables: &[HtmlElement]) -> Option<usize> {
        let active = self.el.document.active_element()?;
        focusables.iter().position(|item| same_node(item, &active))
    }

    fn is_inside_nav(&self, node: &Node) -> bool {
        self.el.menu.contains(Some(node)) || self.el.toggle.contains(Some(node))
    }
}

// =============================================================
// Smooth scroll fallback
// =============================================================

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Drive an eased scroll with `requestAnimationFrame` until it finishes.
fn animate_scroll(window: &Window, to: f64, duration_ms: f64) -> Result<()> {
    let animation = RefCell::new(ScrollAnimation::new(window.scroll_y()?, to, duration_ms));
    let holder: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let win = window.clone();

    let cb = Closure::wrap(Box::new(move |now_ms: f64| {
        let frame = animation.borrow_mut().frame(now_ms);
        win.scroll_to_with_x_and_y(0.0, frame.position);
        if frame.finished {
            holder_for_cb.borrow_mut().take();
            return;
        }
        let requested = match holder_for_cb.borrow().as_ref() {
            Some(next) => win.request_animation_frame(next.as_ref().unchecked_ref()).map(|_| ()),
            None => Ok(()),
        };
        if let Err(err) = requested {
            log::warn!("scroll animation stopped: {}", NavError::from(err));
            holder_for_cb.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>);

    window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    *holder.borrow_mut() = Some(cb);
    Ok(())
}

// =============================================================
// Entrance animation
// =============================================================

/// Hide the matching cards and reveal each one the first time it scrolls
/// into view. Returns the number of cards observed.
pub fn mount_reveal(window: &Window, selector: &str) -> Result<usize> {
    let document = window.document().ok_or_else(|| NavError::missing("document"))?;
    let cards = html_elements(&document.query_selector_all(selector)?);
    for card in &cards {
        apply_styles(card, &hidden_styles())?;
    }

    let observed = cards.clone();
    let tracker = RefCell::new(RevealTracker::new(cards.len()));
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Some(entry) = entry.dyn_ref::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = cards.iter().position(|card| same_node(card, &target)) else {
                    continue;
                };
                if !tracker.borrow_mut().observe(index, entry.is_intersecting()) {
                    continue;
                }
                if let Some(card) = cards.get(index) {
                    report("reveal", apply_styles(card, &revealed_styles()));
                }
                observer.unobserve(&target);
            }
            if tracker.borrow().all_revealed() {
                observer.disconnect();
            }
        },
    );

    let options = ObserverOptions::default();
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(options.root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for card in &observed {
        observer.observe(card);
    }
    Ok(observed.len())
}

fn apply_styles(element: &HtmlElement, styles: &StyleSet) -> Result<()> {
    let style = element.style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}

// =============================================================
// Fallback
// =============================================================

/// Log escaping script errors and attach the fallback toggle.
pub fn install_error_listener(window: &Window, config: &NavConfig, latch: Rc<FallbackLatch>) -> Result<()> {
    let win = window.clone();
    let config = config.clone();
    listen(window, "error", move |event| {
        let message = event.dyn_ref::<ErrorEvent>().map(ErrorEvent::message).unwrap_or_default();
        log::warn!("script error caught: {message}");
        report("fallback toggle", install_fallback(&win, &config, &latch).map(|_| ()));
    })
}

/// Attach a bare click-to-toggle handler to the menu toggle.
///
/// Returns `Ok(false)` when the toggle or menu is missing, or the latch
/// refuses (already attached, or the controller is live).
pub fn install_fallback(window: &Window, config: &NavConfig, latch: &FallbackLatch) -> Result<bool> {
    let Some(document) = window.document() else {
        return Ok(false);
    };
    let Some(toggle) = document.get_element_by_id(&config.toggle_id) else {
        return Ok(false);
    };
    if document.get_element_by_id(&config.menu_id).is_none() || !latch.claim() {
        return Ok(false);
    }

    let menu_id = config.menu_id.clone();
    let open_class = config.open_class.clone();
    let attached = listen(&toggle, "click", move |_| {
        let Some(menu) = document.get_element_by_id(&menu_id) else {
            return;
        };
        if let Err(err) = menu.class_list().toggle(&open_class) {
            log::warn!("fallback toggle: {}", NavError::from(err));
        }
    });
    if let Err(err) = attached {
        latch.release();
        return Err(err);
    }
    log::info!("fallback menu toggle attached");
    Ok(true)
}

// =============================================================
// Helpers
// =============================================================

/// Register `handler` for `kind` events on `target` for the page lifetime.
fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn report(context: &str, result: Result<()>) {
    if let Err(err) = result {
        log::warn!("{context}: {err}");
    }
}

fn key_press(event: &Event) -> Option<KeyPress> {
    let event = event.dyn_ref::<KeyboardEvent>()?;
    Some(KeyPress::from_browser(&event.key(), event.shift_key()))
}

fn event_node(event: &Event) -> Option<Node> {
    event.target()?.dyn_ref::<Node>().cloned()
}

fn same_node(a: &Node, b: &Node) -> bool {
    a.is_same_node(Some(b))
}

fn has_property(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

fn by_id(document: &Document, id: &str) -> Result<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_ref::<HtmlElement>().cloned())
        .ok_or_else(|| NavError::missing(format!("#{id}")))
}

fn by_selector(document: &Document, selector: &str) -> Result<HtmlElement> {
    document
        .query_selector(selector)?
        .and_then(|el| el.dyn_ref::<HtmlElement>().cloned())
        .ok_or_else(|| NavError::missing(selector))
}

fn html_elements(list: &NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<HtmlElement>().cloned())
        .collect()
}
