//! Scroll targets and the frame-driven smooth scroll used when the browser
//! has no native `scroll-behavior` support.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

/// Scroll offset that puts a section's top just below the fixed header.
#[must_use]
pub fn target_offset(section_top: f64, header_height: f64) -> f64 {
    section_top - header_height
}

/// Quadratic ease-in-out.
///
/// `t` is elapsed time, `b` the start value, `c` the total change and `d` the
/// duration. Returns `b` at `t = 0` and `b + c` at `t = d`.
#[must_use]
pub fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    let t = t - 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

/// One step of a [`ScrollAnimation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    /// Vertical offset to scroll to on this frame.
    pub position: f64,
    /// No further frames are needed.
    pub finished: bool,
}

/// An in-flight eased scroll from one offset to another.
///
/// The first call to [`ScrollAnimation::frame`] fixes the start time, so the
/// first frame always lands on the start position.
#[derive(Debug, Clone)]
pub struct ScrollAnimation {
    start: f64,
    distance: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl ScrollAnimation {
    #[must_use]
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self { start: from, distance: to - from, duration_ms, started_at: None }
    }

    /// Final offset of the animation.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.start + self.distance
    }

    /// Position for the animation-frame timestamp `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> ScrollFrame {
        if self.duration_ms <= 0.0 {
            return ScrollFrame { position: self.target(), finished: true };
        }
        let started_at = *self.started_at.get_or_insert(now_ms);
        let elapsed = (now_ms - started_at).max(0.0);
        // Frames rarely land exactly on the duration; clamp so the last one
        // hits the target instead of easing past it.
        let t = elapsed.min(self.duration_ms);
        ScrollFrame {
            position: ease_in_out_quad(t, self.start, self.distance, self.duration_ms),
            finished: elapsed >= self.duration_ms,
        }
    }
}
