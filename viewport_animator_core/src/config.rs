// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animator configuration.
//!
//! [`AnimatorConfig`] gathers every page-wide constant the effects use. The
//! defaults from [`AnimatorConfig::new`] are the site's stock look; DOM
//! attributes override the per-element parts at discovery time.

use crate::format::NumberLocale;
use crate::registry::EffectKind;
use crate::time::Duration;
use crate::visibility::WatchOptions;

/// Configuration for the [`ViewportAnimator`](crate::animator::ViewportAnimator).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorConfig {
    /// Watch options for `data-animate` elements.
    pub fade_in_up: WatchOptions,
    /// Watch options for `data-timeline` elements.
    pub timeline: WatchOptions,
    /// Watch options for `data-reveal` elements.
    pub smooth_reveal: WatchOptions,
    /// Watch options for `data-progress` bars.
    pub progress: WatchOptions,
    /// Watch options for `data-counter` elements.
    pub counter: WatchOptions,
    /// Default reveal delay per sibling position.
    pub stagger: Duration,
    /// Pause between a progress bar becoming visible and its fill starting,
    /// so the width transition is perceptible.
    pub progress_buffer: Duration,
    /// Counter duration when `data-duration` is absent.
    pub counter_duration: Duration,
    /// Parallax speed when `data-parallax` is empty or invalid.
    pub parallax_speed: f64,
    /// Fraction of the pointer offset a magnetic button follows.
    pub magnetic_damping: f64,
    /// Digit grouping for counters.
    pub locale: NumberLocale,
}

impl AnimatorConfig {
    /// Stock configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fade_in_up: WatchOptions::new(0.1).with_bottom_margin(-50.0),
            timeline: WatchOptions::new(0.2).with_bottom_margin(-30.0),
            smooth_reveal: WatchOptions::new(0.15),
            progress: WatchOptions::new(0.5),
            counter: WatchOptions::new(0.5),
            stagger: Duration::from_millis(100),
            progress_buffer: Duration::from_millis(200),
            counter_duration: Duration::from_millis(2000),
            parallax_speed: 0.5,
            magnetic_damping: 0.15,
            locale: NumberLocale::En,
        }
    }

    /// Same as [`new`](Self::new) with a different counter locale.
    #[must_use]
    pub const fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Watch options for a one-shot kind, `None` for continuous kinds.
    #[must_use]
    pub const fn watch_options(&self, kind: EffectKind) -> Option<WatchOptions> {
        match kind {
            EffectKind::FadeInUp => Some(self.fade_in_up),
            EffectKind::Timeline => Some(self.timeline),
            EffectKind::SmoothReveal => Some(self.smooth_reveal),
            EffectKind::Progress => Some(self.progress),
            EffectKind::Counter => Some(self.counter),
            EffectKind::Parallax | EffectKind::Magnetic => None,
        }
    }

    /// Default reveal delay for the element at `sibling_index`.
    #[must_use]
    pub const fn stagger_delay(&self, sibling_index: usize) -> Duration {
        self.stagger.saturating_mul(sibling_index as u64)
    }
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
