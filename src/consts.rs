//! Shared constants for the navigation crate.

// ── Layout ──────────────────────────────────────────────────────

/// Viewport width (CSS pixels) above which the mobile menu is closed.
pub const BREAKPOINT_PX: f64 = 768.0;

// ── Scroll tracking ─────────────────────────────────────────────

/// Quiet interval for the scroll handler, in milliseconds.
pub const SCROLL_THROTTLE_MS: u32 = 100;

/// Distance below the scroll offset used as the active-section probe.
pub const PROBE_OFFSET_PX: f64 = 100.0;

/// How far above its `offsetTop` a section starts counting as current.
pub const SECTION_LEAD_PX: f64 = 150.0;

/// Scroll offset past which the header switches to the raised shadow.
pub const SHADOW_THRESHOLD_PX: f64 = 50.0;

/// Header shadow while the page is at (or near) the top.
pub const SHADOW_RESTING: &str = "0 2px 10px rgba(0, 0, 0, 0.1)";

/// Header shadow once the page has scrolled.
pub const SHADOW_SCROLLED: &str = "0 2px 20px rgba(0, 0, 0, 0.15)";

// ── Smooth scroll fallback ──────────────────────────────────────

/// Duration of the frame-driven scroll animation, in milliseconds.
pub const SMOOTH_SCROLL_DURATION_MS: f64 = 800.0;

// ── Entrance animation ──────────────────────────────────────────

/// Fraction of a card that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Observer root margin; pulls the bottom edge of the viewport up by 50px.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Downward offset a card starts from before it is revealed.
pub const REVEAL_OFFSET_PX: f64 = 20.0;

/// Transition applied to hidden cards.
pub const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

// ── Accessibility ───────────────────────────────────────────────

/// Elements inside the open menu that participate in the focus trap.
pub const FOCUSABLE_SELECTOR: &str = "button, [href], input, select, textarea, [tabindex]:not([tabindex=\"-1\"])";

