//! Deferred work.
//!
//! Everything that runs "later" (debounced scroll handlers, counter ticks,
//! staggered reveals, ripple cleanup) goes through [`Scheduler`], so the same
//! code runs on browser timers and on the deterministic clock used in tests.

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler: Clone + 'static {
    /// Handle to a pending task. Passing it to [`Scheduler::cancel`] stops the task.
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Task) -> Self::Handle;

    fn cancel(&self, handle: Self::Handle);

    /// Run `task` after `delay_ms` with no way to cancel it.
    fn spawn(&self, delay_ms: u32, task: Task);
}

/// `setTimeout` through gloo. Dropping a [`Timeout`] clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Task) -> Timeout {
        Timeout::new(delay_ms, task)
    }

    fn cancel(&self, handle: Timeout) {
        drop(handle);
    }

    /// The callback frees itself after its single run, so fire-and-forget
    /// timers (counter ticks, ripple cleanup) don't pile up.
    fn spawn(&self, delay_ms: u32, task: Task) {
        let callback = Closure::once_into_js(move || task());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let armed = web_sys::window().map(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        });
        if !matches!(armed, Some(Ok(_))) {
            log::warn!("could not arm a {}ms timer", delay_ms);
        }
    }
}
