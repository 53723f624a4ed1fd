// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effect registry: marker attributes, per-element parameters and their
//! defaults.
//!
//! Every effect the animator knows about is an [`EffectKind`]. Each kind is
//! selected by the presence of one marker attribute (see
//! [`EffectKind::marker`]) and reads its parameters from sibling attributes.
//! Discovery goes through the [`Markup`] trait so the same parsing runs
//! against live DOM nodes in the web backend and against fakes in tests.
//!
//! Parsing never fails: missing or malformed values fall back to the
//! defaults in [`AnimatorConfig`].

use alloc::string::String;

use crate::config::AnimatorConfig;
use crate::time::Duration;

/// Dense index of a tracked element, assigned in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Returns the id as a slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The effect an element belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EffectKind {
    /// Fade in while sliding up.
    FadeInUp,
    /// Timeline entry reveal.
    Timeline,
    /// Opacity-only reveal.
    SmoothReveal,
    /// Progress bar fill.
    Progress,
    /// Animated numeric counter.
    Counter,
    /// Scroll-linked vertical offset.
    Parallax,
    /// Pointer-following button.
    Magnetic,
}

impl EffectKind {
    /// All kinds, in discovery order.
    pub const ALL: [Self; 7] = [
        Self::FadeInUp,
        Self::Timeline,
        Self::SmoothReveal,
        Self::Progress,
        Self::Counter,
        Self::Parallax,
        Self::Magnetic,
    ];

    /// The attribute whose presence selects this effect.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::FadeInUp => "data-animate",
            Self::Timeline => "data-timeline",
            Self::SmoothReveal => "data-reveal",
            Self::Progress => "data-progress",
            Self::Counter => "data-counter",
            Self::Parallax => "data-parallax",
            Self::Magnetic => "data-magnetic",
        }
    }

    /// CSS selector matching every element carrying [`marker`](Self::marker).
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::FadeInUp => "[data-animate]",
            Self::Timeline => "[data-timeline]",
            Self::SmoothReveal => "[data-reveal]",
            Self::Progress => "[data-progress]",
            Self::Counter => "[data-counter]",
            Self::Parallax => "[data-parallax]",
            Self::Magnetic => "[data-magnetic]",
        }
    }

    /// Whether the effect fires once on first visibility.
    ///
    /// Parallax and magnetic effects are continuous and never observed.
    #[must_use]
    pub const fn is_one_shot(self) -> bool {
        !matches!(self, Self::Parallax | Self::Magnetic)
    }

    /// Whether the effect is one of the fade/reveal family.
    #[must_use]
    pub const fn is_reveal(self) -> bool {
        matches!(self, Self::FadeInUp | Self::Timeline | Self::SmoothReveal)
    }
}

/// Attribute names read in addition to the markers.
pub mod attr {
    /// Explicit reveal delay in milliseconds.
    pub const DELAY: &str = "data-delay";
    /// Counter suffix text.
    pub const SUFFIX: &str = "data-suffix";
    /// Counter duration in milliseconds.
    pub const DURATION: &str = "data-duration";
}

/// Class of the fill sub-element inside a progress bar.
pub const PROGRESS_FILL_SELECTOR: &str = ".progress-bar-fill";

/// Read-only view of a marked element, as needed for discovery.
pub trait Markup {
    /// Returns the value of `name`, or `None` when the attribute is absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Returns `true` if a descendant matches `selector`.
    fn has_descendant(&self, selector: &str) -> bool;

    /// Position of the element among its parent's element children.
    fn sibling_index(&self) -> usize;
}

/// Per-element parameters, resolved from attributes at discovery.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectParams {
    /// Fade/reveal family.
    Reveal {
        /// Delay between trigger and reveal.
        delay: Duration,
    },
    /// Progress bar.
    Progress {
        /// Target fill percentage, 0–100.
        percent: u8,
    },
    /// Counter.
    Counter {
        /// Final displayed value.
        target: u64,
        /// Text appended after the number.
        suffix: String,
        /// Total animation time.
        duration: Duration,
    },
    /// Parallax.
    Parallax {
        /// Offset per scrolled pixel.
        speed: f64,
    },
    /// Magnetic button.
    Magnetic,
}

/// A discovered element: its effect and resolved parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementSpec {
    /// Which effect applies.
    pub kind: EffectKind,
    /// Parameters for that effect.
    pub params: EffectParams,
}

impl ElementSpec {
    /// Resolves the spec for an element already known to carry `kind`'s
    /// marker.
    ///
    /// Returns `None` when the effect cannot apply, which today only
    /// happens for a progress bar without a fill sub-element.
    #[must_use]
    pub fn discover(kind: EffectKind, node: &impl Markup, config: &AnimatorConfig) -> Option<Self> {
        let params = match kind {
            EffectKind::FadeInUp | EffectKind::Timeline | EffectKind::SmoothReveal => {
                let delay = node
                    .attribute(attr::DELAY)
                    .as_deref()
                    .and_then(parse_millis)
                    .unwrap_or_else(|| config.stagger_delay(node.sibling_index()));
                EffectParams::Reveal { delay }
            }
            EffectKind::Progress => {
                if !node.has_descendant(PROGRESS_FILL_SELECTOR) {
                    return None;
                }
                let percent = parse_percent(node.attribute(kind.marker()).as_deref());
                EffectParams::Progress { percent }
            }
            EffectKind::Counter => {
                let target = node
                    .attribute(kind.marker())
                    .as_deref()
                    .and_then(parse_count)
                    .unwrap_or(0);
                let suffix = node.attribute(attr::SUFFIX).unwrap_or_default();
                let duration = node
                    .attribute(attr::DURATION)
                    .as_deref()
                    .and_then(parse_millis)
                    .unwrap_or(config.counter_duration);
                EffectParams::Counter {
                    target,
                    suffix,
                    duration,
                }
            }
            EffectKind::Parallax => EffectParams::Parallax {
                speed: parse_speed(node.attribute(kind.marker()).as_deref())
                    .unwrap_or(config.parallax_speed),
            },
            EffectKind::Magnetic => EffectParams::Magnetic,
        };
        Some(Self { kind, params })
    }
}

/// Parses a progress percentage.
///
/// Accepts a non-negative integer; values above 100 clamp to 100. Anything
/// else, including an absent attribute, yields 0.
#[must_use]
pub fn parse_percent(raw: Option<&str>) -> u8 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<u32>().ok())
        .map_or(0, |p| u8::try_from(p.min(100)).unwrap_or(100))
}

/// Parses a non-negative integer counter target. Digits may carry `,`
/// grouping (`"1,000"`).
#[must_use]
pub fn parse_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let mut value: u64 = 0;
    for c in raw.chars() {
        if c == ',' {
            continue;
        }
        let digit = c.to_digit(10)?;
        value = value.checked_mul(10)?.checked_add(u64::from(digit))?;
    }
    Some(value)
}

/// Parses a whole-millisecond duration.
#[must_use]
pub fn parse_millis(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().map(Duration::from_millis)
}

/// Parses a finite parallax speed factor.
#[must_use]
pub fn parse_speed(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
