//! Site navigation behavior for the marketing pages.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It drives
//! the mobile hamburger menu, highlights the navigation link for the section
//! in view, raises the header shadow once the page scrolls, reveals content
//! cards as they enter the viewport, and keeps keyboard focus inside the open
//! menu. All decisions live in the headless [`controller::NavCore`]; the
//! [`dom`] module only wires browser events to it and applies the resulting
//! [`controller::Effect`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Testable [`controller::NavCore`] and the effects it emits |
//! | [`dom`] | Browser binding: element lookup, listeners, effect application |
//! | [`menu`] | Menu state machine and transition table |
//! | [`sections`] | Scroll-derived active section and header shadow |
//! | [`scroll`] | Scroll targets and the eased fallback animation |
//! | [`throttle`] | Trailing-edge coalescing of scroll events |
//! | [`reveal`] | Entrance animation styles and one-shot tracking |
//! | [`focus`] | Focus-trap wrap targets |
//! | [`input`] | Keyboard key mapping |
//! | [`guard`] | Degraded-mode fallback toggle gate |
//! | [`config`] | Page-level configuration |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric and style constants |

use wasm_bindgen::prelude::*;

pub mod config;
pub mod consts;
pub mod controller;
pub mod dom;
pub mod error;
pub mod focus;
pub mod guard;
pub mod input;
pub mod menu;
pub mod reveal;
pub mod scroll;
pub mod sections;
pub mod throttle;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        // Another module already installed a logger; keep using it.
        log::debug!("console logger not installed: {err}");
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let config = dom::read_config(&window);
    log::set_max_level(config.level().to_level_filter());

    if let Err(err) = dom::boot(window, config) {
        log::warn!("navigation startup failed: {err}");
    }
}
