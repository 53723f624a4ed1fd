// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-linked parallax.
//!
//! Scroll events can arrive many times per frame. [`ScrollCoalescer`] keeps
//! only the latest position and asks for at most one frame until that frame
//! has consumed it.

use alloc::format;
use alloc::string::String;

/// Vertical offset for a parallax element: `-(scroll * speed)`.
///
/// Negative zero is normalized to zero.
#[must_use]
pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    let offset = -(scroll_y * speed);
    if offset == 0.0 { 0.0 } else { offset }
}

/// CSS `transform` for a vertical offset in pixels.
#[must_use]
pub fn translate_y(offset: f64) -> String {
    format!("translateY({offset}px)")
}

/// Coalesces scroll events into one update per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollCoalescer {
    latest: f64,
    pending: bool,
}

impl ScrollCoalescer {
    /// Creates an idle coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scroll position.
    ///
    /// Returns `true` only for the first event since the last
    /// [`take`](Self::take); that is when the caller must request a frame.
    pub fn record(&mut self, scroll_y: f64) -> bool {
        self.latest = scroll_y;
        let newly_pending = !self.pending;
        self.pending = true;
        newly_pending
    }

    /// Returns `true` while a recorded position awaits a frame.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consumes the pending position, if any.
    pub fn take(&mut self) -> Option<f64> {
        if self.pending {
            self.pending = false;
            Some(self.latest)
        } else {
            None
        }
    }
}
