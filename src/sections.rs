//! Scroll-position queries: which section is current, and which header shadow
//! applies.

#[cfg(test)]
#[path = "sections_test.rs"]
mod sections_test;

use crate::consts::{SHADOW_RESTING, SHADOW_SCROLLED};

/// Vertical extent of one `section[id]` landmark, in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    /// `offsetTop` of the section.
    pub top: f64,
    /// `offsetHeight` of the section.
    pub height: f64,
}

impl SectionBounds {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self { id: id.into(), top, height }
    }

    /// Whether `probe` falls inside `[top - lead, top - lead + height)`.
    #[must_use]
    pub fn contains(&self, probe: f64, lead: f64) -> bool {
        let start = self.top - lead;
        probe >= start && probe < start + self.height
    }
}

/// Geometry used to turn a scroll offset into a current section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionProbe {
    /// Added to `scrollY` to get the reference point.
    pub offset: f64,
    /// Subtracted from each section's top.
    pub lead: f64,
}

impl SectionProbe {
    /// The section containing the reference point for `scroll_y`.
    ///
    /// Sections are in document order and may overlap once the lead is
    /// applied; the last match wins.
    #[must_use]
    pub fn current<'a>(&self, scroll_y: f64, sections: &'a [SectionBounds]) -> Option<&'a str> {
        let probe = scroll_y + self.offset;
        sections
            .iter()
            .rev()
            .find(|s| s.contains(probe, self.lead))
            .map(|s| s.id.as_str())
    }
}

/// Index of the first link whose href is exactly `#<id>`.
#[must_use]
pub fn link_for_section(hrefs: &[Option<String>], id: &str) -> Option<usize> {
    hrefs.iter().position(|href| {
        href.as_deref()
            .and_then(|h| h.strip_prefix('#'))
            .is_some_and(|fragment| fragment == id)
    })
}

/// The two header shadow styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderShadow {
    Resting,
    Scrolled,
}

impl HeaderShadow {
    /// `Scrolled` once `scroll_y` is strictly past `threshold`.
    #[must_use]
    pub fn for_scroll(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold { Self::Scrolled } else { Self::Resting }
    }

    /// The `box-shadow` value for this style.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Resting => SHADOW_RESTING,
            Self::Scrolled => SHADOW_SCROLLED,
        }
    }
}
