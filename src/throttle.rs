//! Trailing-edge call coalescing for scroll handling.
//!
//! Every [`Throttle::trigger`] cancels the pending run and schedules a new one
//! `wait_ms` later, so the wrapped function only runs once the triggers go
//! quiet for a full interval. Under continuous scrolling it does not run at a
//! fixed rate; it runs after scrolling pauses.
//!
//! Timers come from a [`Scheduler`]. In the browser that is
//! [`TimeoutScheduler`] (backed by `gloo-timers`); tests use a manual clock.

#[cfg(test)]
#[path = "throttle_test.rs"]
mod throttle_test;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Source of one-shot timers.
///
/// Dropping a returned handle must cancel its timer if it has not fired.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser timers via `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

/// Wraps a function so bursts of triggers collapse into one trailing call.
pub struct Throttle<S: Scheduler> {
    scheduler: S,
    wait_ms: u32,
    func: Rc<dyn Fn()>,
    // A handle that already fired stays here until the next trigger replaces it.
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Throttle<S> {
    pub fn new(scheduler: S, wait_ms: u32, func: impl Fn() + 'static) -> Self {
        Self { scheduler, wait_ms, func: Rc::new(func), pending: RefCell::new(None) }
    }

    /// Restart the quiet interval; the wrapped function runs when it elapses.
    pub fn trigger(&self) {
        let func = Rc::clone(&self.func);
        // Cancel first so the old and new timers never coexist.
        self.pending.borrow_mut().take();
        let handle = self.scheduler.schedule(self.wait_ms, Box::new(move || func()));
        *self.pending.borrow_mut() = Some(handle);
    }
}
