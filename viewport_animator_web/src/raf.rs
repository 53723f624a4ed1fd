// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` frame source.
//!
//! [`RafLoop`] drives the animator's frame timeline using the browser's
//! `requestAnimationFrame` API. Each callback receives a
//! [`DOMHighResTimeStamp`][mdn] (milliseconds from `performance.now()`),
//! which is converted to microsecond [`HostTime`] ticks.
//!
//! Unlike a render loop, the animator only needs frames while something is
//! moving, so the callback reports whether another frame is wanted and the
//! loop parks itself when it is not. Event handlers call
//! [`start`](RafLoop::start) again whenever they queue new work.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use viewport_animator_core::time::HostTime;

// Direct global bindings instead of `web_sys::Window` methods; avoids
// fetching (and unwrapping) the Window/Performance objects on every frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// Whether a frame callback wants another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Request the next frame.
    Continue,
    /// Park until [`RafLoop::start`] is called again.
    Park,
}

/// A `requestAnimationFrame` loop that runs while its callback asks for it.
///
/// Create with [`RafLoop::new`], then call [`start`](Self::start) whenever
/// there is work. The loop re-registers itself each frame until the callback
/// returns [`FrameControl::Park`], [`stop`](Self::stop) is called, or the
/// `RafLoop` is dropped.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Created once in [`RafLoop::new`] and reused for every frame.
    closure: RefCell<Option<RafClosure>>,

    /// The user-supplied callback that receives frame timestamps.
    callback: RefCell<Box<dyn FnMut(HostTime) -> FrameControl>>,

    /// Whether a frame is currently requested.
    running: Cell<bool>,

    /// The ID returned by the most recent `requestAnimationFrame` call,
    /// used by [`cancel_animation_frame`] when stopping.
    raf_id: Cell<i32>,
}

impl RafLoop {
    /// Creates a new `RafLoop` that is **not yet running**.
    pub fn new(callback: impl FnMut(HostTime) -> FrameControl + 'static) -> Self {
        let inner = Rc::new(RafInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            running: Cell::new(false),
            raf_id: Cell::new(0),
        });

        // The closure holds a weak reference so dropping the `RafLoop`
        // frees both.
        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if !inner.running.get() {
                return;
            }

            let now = HostTime::from_millis_f64(timestamp_ms);

            // The borrow is scoped so it doesn't overlap with the `closure`
            // RefCell.
            let control = inner.callback.borrow_mut()(now);

            match control {
                FrameControl::Park => inner.running.set(false),
                FrameControl::Continue => {
                    if inner.running.get()
                        && let Some(ref closure) = *inner.closure.borrow()
                    {
                        let id = request_animation_frame(closure.as_ref().unchecked_ref());
                        inner.raf_id.set(id);
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Requests frames until the callback parks the loop.
    ///
    /// If already running, this is a no-op, so callers can invoke it after
    /// every event that may have queued work.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        if let Some(ref closure) = *self.inner.closure.borrow() {
            self.inner.running.set(true);
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.inner.raf_id.set(id);
        }
    }

    /// Stops the loop and cancels the pending frame.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        cancel_animation_frame(self.inner.raf_id.get());
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("running", &self.inner.running.get())
            .finish()
    }
}
