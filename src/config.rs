//! Page-level configuration.
//!
//! Defaults match the stock site markup. A page can override any field with
//! an inline JSON block:
//!
//! ```html
//! <script type="application/json" id="nav-config">{ "breakpoint_px": 900 }</script>
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    BREAKPOINT_PX, PROBE_OFFSET_PX, SCROLL_THROTTLE_MS, SECTION_LEAD_PX, SHADOW_THRESHOLD_PX, SMOOTH_SCROLL_DURATION_MS,
};
use crate::error::Result;
use crate::sections::SectionProbe;

/// Id of the inline `<script>` block holding a [`NavConfig`] override.
pub const CONFIG_ELEMENT_ID: &str = "nav-config";

/// Element hooks, class names, and tuning for the navigation controller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Id of the hamburger toggle control.
    pub toggle_id: String,
    /// Id of the collapsible menu container.
    pub menu_id: String,
    /// Navigation anchors.
    pub link_selector: String,
    /// Fixed page header.
    pub header_selector: String,
    /// Landmarks used for scroll-derived active links.
    pub section_selector: String,
    /// Cards that get the entrance animation.
    pub reveal_selector: String,

    /// Present on the menu while it is open.
    pub open_class: String,
    /// Present on the toggle while the menu is open.
    pub toggle_active_class: String,
    /// Present on the single active navigation link.
    pub link_active_class: String,

    pub breakpoint_px: f64,
    pub throttle_ms: u32,
    pub probe_offset_px: f64,
    pub section_lead_px: f64,
    pub shadow_threshold_px: f64,
    pub scroll_duration_ms: f64,

    /// `log` level name for the console logger (`"info"`, `"debug"`, ...).
    pub log_level: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_id: "nav-toggle".into(),
            menu_id: "nav-menu".into(),
            link_selector: ".nav__link".into(),
            header_selector: ".header".into(),
            section_selector: "section[id]".into(),
            reveal_selector: ".service-card, .solution-card".into(),
            open_class: "show-menu".into(),
            toggle_active_class: "active".into(),
            link_active_class: "nav__link--active".into(),
            breakpoint_px: BREAKPOINT_PX,
            throttle_ms: SCROLL_THROTTLE_MS,
            probe_offset_px: PROBE_OFFSET_PX,
            section_lead_px: SECTION_LEAD_PX,
            shadow_threshold_px: SHADOW_THRESHOLD_PX,
            scroll_duration_ms: SMOOTH_SCROLL_DURATION_MS,
            log_level: "info".into(),
        }
    }
}

impl NavConfig {
    /// Parse an override block; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parse an optional override block, falling back to defaults.
    ///
    /// A malformed block is logged and ignored.
    #[must_use]
    pub fn from_optional_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using default navigation config");
                Self::default()
            }
        }
    }

    /// Console log level; unknown names fall back to `Info`.
    #[must_use]
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Style rule injected once for the active navigation link.
    #[must_use]
    pub fn active_link_css(&self) -> String {
        let class = &self.link_active_class;
        format!(
            ".{class} {{\n    color: var(--almonx-primary) !important;\n}}\n\
             .{class}::after {{\n    width: 100% !important;\n}}\n"
        )
    }

    /// Geometry for scroll-derived section lookup.
    #[must_use]
    pub fn probe(&self) -> SectionProbe {
        SectionProbe { offset: self.probe_offset_px, lead: self.section_lead_px }
    }
}
