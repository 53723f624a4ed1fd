// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for the viewport animator.
//!
//! This crate wires [`viewport_animator_core`] to browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` frame source that parks itself
//!   while the animator is idle
//! - [`DomPresenter`]: applies style, class and text changes to DOM elements
//! - `IntersectionObserver` per effect family, plus scroll and pointer
//!   listeners for parallax and magnetic elements
//! - [`ConsoleSink`]: lifecycle logging to the browser console (with the
//!   `trace` feature)
//! - `window.FDTM`: `animateCounter`, `formatCurrency` and
//!   `scrollToElement` for page scripts
//!
//! Everything is installed by the module's start function once the wasm
//! module is instantiated; pages only need to carry the marker attributes.

#![no_std]

extern crate alloc;

mod api;
mod console;
mod error;
mod listeners;
mod markup;
mod observer;
mod presenter;
mod raf;
mod runtime;

pub use api::{GLOBAL, format_currency, scroll_to_element};
pub use console::ConsoleSink;
pub use error::WebError;
pub use presenter::DomPresenter;
pub use raf::{FrameControl, RafLoop};
pub use viewport_animator_core::backend::Presenter;

use viewport_animator_core::time::HostTime;
use wasm_bindgen::prelude::*;

/// Returns the current host time from `performance.now()`, in microsecond
/// ticks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}

/// Entry point, called automatically by `wasm_bindgen(start)`.
///
/// Discovers marked elements, applies their initial state and installs
/// observers, listeners and `window.FDTM`.
///
/// # Errors
///
/// Throws if the page has no `window`/`document` or a browser API refuses
/// an observer, listener or the global. The page is left unstyled then.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let runtime = runtime::Runtime::install()?;

    // Keep observers and listeners alive; there is no teardown on the web.
    core::mem::forget(runtime);

    Ok(())
}
