// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fade/reveal and progress-bar styles.
//!
//! Reveals are one-directional: [`RevealStyle::hide`] runs at registration,
//! [`RevealStyle::reveal`] once on trigger, and nothing ever hides an
//! element again. Progress bars follow the same shape with a width instead
//! of an opacity.

use alloc::format;

use crate::changes::FrameChanges;
use crate::registry::{EffectKind, ElementId};

/// Hidden/revealed look of one reveal kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealStyle {
    /// Initial `transform`, or `None` for opacity-only reveals.
    pub hidden_transform: Option<&'static str>,
    /// `transition` applied at registration.
    pub transition: &'static str,
    /// Class added on reveal.
    pub class: &'static str,
}

impl RevealStyle {
    /// Style for a reveal kind; `None` for other kinds.
    #[must_use]
    pub const fn for_kind(kind: EffectKind) -> Option<Self> {
        match kind {
            EffectKind::FadeInUp => Some(Self {
                hidden_transform: Some("translateY(30px)"),
                transition: "opacity 0.6s ease-out, transform 0.6s ease-out",
                class: "animate-fade-in-up",
            }),
            EffectKind::Timeline => Some(Self {
                hidden_transform: Some("translateY(20px)"),
                transition: "opacity 0.5s ease-out, transform 0.5s ease-out",
                class: "revealed",
            }),
            EffectKind::SmoothReveal => Some(Self {
                hidden_transform: None,
                transition: "opacity 0.8s cubic-bezier(0.4, 0, 0.2, 1)",
                class: "revealed",
            }),
            _ => None,
        }
    }

    /// Queues the initial hidden state.
    pub fn hide(&self, element: ElementId, out: &mut FrameChanges) {
        out.style(element, "opacity", "0");
        if let Some(transform) = self.hidden_transform {
            out.style(element, "transform", transform);
        }
        out.style(element, "transition", self.transition);
    }

    /// Queues the revealed state and marker class.
    pub fn reveal(&self, element: ElementId, out: &mut FrameChanges) {
        out.style(element, "opacity", "1");
        if self.hidden_transform.is_some() {
            out.style(element, "transform", "translateY(0)");
        }
        out.add_class(element, self.class);
    }
}

/// Width transition for progress fills.
pub const PROGRESS_TRANSITION: &str = "width 1s ease-out";

/// Queues the zero-width starting state of a progress fill.
pub fn reset_progress(element: ElementId, out: &mut FrameChanges) {
    out.style(element, "width", "0%");
    out.style(element, "transition", PROGRESS_TRANSITION);
}

/// Queues the final width of a progress fill.
pub fn fill_progress(element: ElementId, percent: u8, out: &mut FrameChanges) {
    out.style(element, "width", format!("{percent}%"));
}
