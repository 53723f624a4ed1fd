// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased numeric counters.
//!
//! A [`CounterAnimation`] counts from zero to a target over a fixed
//! duration using [`ease_out_quart`]. The start time is taken from the first
//! frame it is sampled on, so a counter triggered between frames starts
//! counting on the next rendered frame rather than mid-interval.

use alloc::string::String;

use crate::format::{NumberLocale, group_digits};
use crate::time::{Duration, HostTime};

/// Ease-out quartic curve: `1 - (1 - t)^4`, with `t` clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_quart(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let inv = 1.0 - t;
    let sq = inv * inv;
    1.0 - sq * sq
}

/// One rendered counter frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    /// Numeric value shown, never above the target.
    pub value: u64,
    /// Text content to display.
    pub text: String,
    /// `true` on the final frame, where `value` equals the target.
    pub finished: bool,
}

/// Counts from zero to `target` over `duration`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterAnimation {
    target: u64,
    suffix: String,
    duration: Duration,
    locale: NumberLocale,
    start: Option<HostTime>,
}

impl CounterAnimation {
    /// Creates a counter that starts on its first [`sample`](Self::sample).
    #[must_use]
    pub fn new(target: u64, suffix: String, duration: Duration, locale: NumberLocale) -> Self {
        Self {
            target,
            suffix,
            duration,
            locale,
            start: None,
        }
    }

    /// Time of the first sample, once sampled.
    #[must_use]
    pub fn start(&self) -> Option<HostTime> {
        self.start
    }

    /// Elapsed fraction of the duration at `now`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress_at(&self, now: HostTime) -> f64 {
        let Some(start) = self.start else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start).ticks() as f64;
        (elapsed / self.duration.ticks() as f64).min(1.0)
    }

    /// Produces the frame for `now`, starting the clock on first use.
    pub fn sample(&mut self, now: HostTime) -> CounterFrame {
        if self.start.is_none() {
            self.start = Some(now);
        }
        let t = self.progress_at(now);
        let finished = t >= 1.0;
        let value = if finished {
            self.target
        } else {
            self.eased_value(t)
        };
        let mut text = group_digits(value, self.locale);
        text.push_str(&self.suffix);
        CounterFrame {
            value,
            text,
            finished,
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "eased product is within [0, target]; truncation is the floor"
    )]
    fn eased_value(&self, t: f64) -> u64 {
        let raw = (ease_out_quart(t) * self.target as f64) as u64;
        // Float rounding near t = 1 must never overshoot.
        raw.min(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::borrow::ToOwned;

    const MS: u64 = 1000;

    fn counter(target: u64, suffix: &str, duration_ms: u64) -> CounterAnimation {
        CounterAnimation::new(
            target,
            suffix.to_owned(),
            Duration::from_millis(duration_ms),
            NumberLocale::En,
        )
    }

    #[test]
    fn easing_endpoints_and_clamping() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(-2.0), 0.0);
        assert_eq!(ease_out_quart(3.0), 1.0);
        assert_eq!(ease_out_quart(f64::NAN), 0.0);
        // 1 - 0.5^4
        assert_eq!(ease_out_quart(0.5), 0.9375);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease_out_quart(f64::from(i) / 100.0);
            assert!(v >= prev, "dipped at step {i}");
            prev = v;
        }
    }

    #[test]
    fn finishes_exactly_on_target_with_suffix() {
        let mut c = counter(1000, "+", 2000);
        let first = c.sample(HostTime(5_000 * MS));
        assert_eq!(first.text, "0+");
        assert!(!first.finished);

        let last = c.sample(HostTime(7_000 * MS));
        assert_eq!(last.text, "1,000+");
        assert_eq!(last.value, 1000);
        assert!(last.finished);
    }

    #[test]
    fn intermediate_values_never_exceed_target() {
        let mut c = counter(1000, "", 2000);
        let start = 100 * MS;
        c.sample(HostTime(start));
        let mut prev = 0;
        // ~60 fps for 2s plus a late frame.
        for frame in 1..=125 {
            let f = c.sample(HostTime(start + frame * 16_667));
            assert!(f.value <= 1000, "frame {frame} showed {}", f.value);
            assert!(f.value >= prev);
            prev = f.value;
            if frame * 16_667 < 2000 * MS {
                assert!(!f.finished);
            } else {
                assert!(f.finished);
                assert_eq!(f.value, 1000);
            }
        }
    }

    #[test]
    fn midpoint_uses_quartic_curve() {
        let mut c = counter(1000, "", 2000);
        c.sample(HostTime(0));
        // t = 0.5 -> 937.5 -> floor 937
        assert_eq!(c.sample(HostTime(1000 * MS)).value, 937);
    }

    #[test]
    fn zero_duration_completes_on_first_frame() {
        let mut c = counter(42, "%", 0);
        let f = c.sample(HostTime(10));
        assert!(f.finished);
        assert_eq!(f.text, "42%");
    }

    #[test]
    fn french_grouping() {
        let mut c = CounterAnimation::new(
            12_500,
            " dons".to_owned(),
            Duration::ZERO,
            NumberLocale::Fr,
        );
        assert_eq!(c.sample(HostTime(0)).text, "12\u{202f}500 dons");
    }

    #[test]
    fn unsampled_counter_has_no_progress() {
        let c = counter(10, "", 1000);
        assert_eq!(c.start(), None);
        assert_eq!(c.progress_at(HostTime(5_000_000)), 0.0);
    }
}
