// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot visibility watching.
//!
//! A [`VisibilityWatcher`] tracks one effect family's elements and reports
//! each element exactly once, the first time its visible fraction reaches
//! the family's threshold. Reported elements are dropped from the watch set
//! and can never be reported again.
//!
//! Input comes from either of two sources:
//!
//! - [`VisibilityEntry`] values, as delivered by the platform observer
//!   (`IntersectionObserver` on the web), via [`VisibilityWatcher::observe`].
//! - Raw geometry (element rectangles and the viewport), via
//!   [`VisibilityWatcher::observe_geometry`], which computes the ratio with
//!   [`intersection_ratio`].
//!
//! Watchers for different families are independent values and never share
//! state.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Insets, Rect};

use crate::registry::ElementId;

/// Tolerance applied when comparing an observed ratio with the threshold.
///
/// Observers report ratios computed in layout units, so a ratio reported
/// for a threshold crossing can land just below the threshold.
const RATIO_EPSILON: f64 = 1e-3;

/// Threshold and margin for one effect family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatchOptions {
    /// Fraction of the element's area (0.0–1.0) that must be on screen.
    pub threshold: f64,
    /// Adjustment applied to the viewport before intersecting. Positive
    /// values grow the viewport on that side, negative values shrink it,
    /// matching CSS `rootMargin`.
    pub margin: Insets,
}

impl WatchOptions {
    /// Options with the given threshold and no margin.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            margin: Insets {
                x0: 0.0,
                y0: 0.0,
                x1: 0.0,
                y1: 0.0,
            },
        }
    }

    /// Shrinks (negative) or grows (positive) the bottom edge of the
    /// viewport by `px`.
    #[must_use]
    pub const fn with_bottom_margin(mut self, px: f64) -> Self {
        self.margin.y1 = px;
        self
    }

    /// Renders the margin as a CSS `rootMargin` string
    /// (`top right bottom left`).
    #[must_use]
    pub fn root_margin(&self) -> String {
        let m = self.margin;
        format!("{}px {}px {}px {}px", m.y0, m.x1, m.y1, m.x0)
    }

    /// Returns `true` if an observation crosses this threshold.
    #[must_use]
    pub fn is_crossed_by(&self, entry: &VisibilityEntry) -> bool {
        if !entry.is_intersecting {
            return false;
        }
        entry.ratio + RATIO_EPSILON >= self.threshold
    }
}

/// One visibility observation for one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityEntry {
    /// The observed element.
    pub element: ElementId,
    /// Visible fraction of the element's area, 0.0–1.0.
    pub ratio: f64,
    /// Whether the element touches the effective viewport at all.
    pub is_intersecting: bool,
}

/// Fraction of `element` inside `viewport` after applying `margin`.
///
/// A zero-area element counts as fully visible when it lies within the
/// effective viewport (edges included) and invisible otherwise.
#[must_use]
pub fn intersection_ratio(element: Rect, viewport: Rect, margin: Insets) -> f64 {
    let root = effective_root(viewport, margin);
    let area = element.area();
    if area <= 0.0 {
        let inside = element.x0 >= root.x0
            && element.x1 <= root.x1
            && element.y0 >= root.y0
            && element.y1 <= root.y1;
        return if inside { 1.0 } else { 0.0 };
    }
    let overlap = element.intersect(root);
    (overlap.area() / area).clamp(0.0, 1.0)
}

/// Builds a [`VisibilityEntry`] from geometry.
#[must_use]
pub fn entry_from_geometry(
    element: ElementId,
    bounds: Rect,
    viewport: Rect,
    margin: Insets,
) -> VisibilityEntry {
    let root = effective_root(viewport, margin);
    let is_intersecting = bounds.x0 <= root.x1
        && bounds.x1 >= root.x0
        && bounds.y0 <= root.y1
        && bounds.y1 >= root.y0;
    VisibilityEntry {
        element,
        ratio: intersection_ratio(bounds, viewport, margin),
        is_intersecting,
    }
}

/// The viewport grown or shrunk by the margin, never inverted.
fn effective_root(viewport: Rect, margin: Insets) -> Rect {
    let root = viewport + margin;
    Rect::new(root.x0, root.y0, root.x1.max(root.x0), root.y1.max(root.y0))
}

/// Reports each watched element once, on its first threshold crossing.
#[derive(Clone, Debug)]
pub struct VisibilityWatcher {
    options: WatchOptions,
    watched: BTreeSet<ElementId>,
}

impl VisibilityWatcher {
    /// Creates a watcher over `elements`.
    ///
    /// Returns `None` for an empty set: a family with no elements on the
    /// page gets no watcher.
    #[must_use]
    pub fn new(options: WatchOptions, elements: impl IntoIterator<Item = ElementId>) -> Option<Self> {
        let watched: BTreeSet<_> = elements.into_iter().collect();
        if watched.is_empty() {
            return None;
        }
        Some(Self { options, watched })
    }

    /// The options this watcher was created with.
    #[must_use]
    pub fn options(&self) -> WatchOptions {
        self.options
    }

    /// Elements still waiting for their first crossing.
    pub fn watched(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.watched.iter().copied()
    }

    /// Returns `true` if `element` is still waiting.
    #[must_use]
    pub fn is_watching(&self, element: ElementId) -> bool {
        self.watched.contains(&element)
    }

    /// Adds `element` to the watch set.
    pub fn watch(&mut self, element: ElementId) {
        self.watched.insert(element);
    }

    /// Drops `element` without reporting it, as if it had already fired.
    ///
    /// Returns `true` if it was still being watched.
    pub fn forget(&mut self, element: ElementId) -> bool {
        self.watched.remove(&element)
    }

    /// Returns `true` once every element has been reported.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.watched.is_empty()
    }

    /// Feeds observer entries and returns the elements that crossed for the
    /// first time, in entry order.
    ///
    /// Entries for unknown or already reported elements are ignored.
    pub fn observe(&mut self, entries: impl IntoIterator<Item = VisibilityEntry>) -> Vec<ElementId> {
        let mut crossed = Vec::new();
        for entry in entries {
            if self.options.is_crossed_by(&entry) && self.watched.remove(&entry.element) {
                crossed.push(entry.element);
            }
        }
        crossed
    }

    /// Computes entries from element bounds and the viewport, then behaves
    /// like [`observe`](Self::observe).
    pub fn observe_geometry(
        &mut self,
        viewport: Rect,
        bounds: impl IntoIterator<Item = (ElementId, Rect)>,
    ) -> Vec<ElementId> {
        let margin = self.options.margin;
        let entries: Vec<_> = bounds
            .into_iter()
            .map(|(id, rect)| entry_from_geometry(id, rect, viewport, margin))
            .collect();
        self.observe(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    fn entry(id: u32, ratio: f64) -> VisibilityEntry {
        VisibilityEntry {
            element: ElementId(id),
            ratio,
            is_intersecting: ratio > 0.0,
        }
    }

    #[test]
    fn ratio_of_partially_visible_element() {
        // Bottom half of a 100px tall box hangs below the viewport.
        let el = Rect::new(0.0, 750.0, 100.0, 850.0);
        let r = intersection_ratio(el, VIEWPORT, Insets::ZERO);
        assert_eq!(r, 0.5);
    }

    #[test]
    fn negative_bottom_margin_shrinks_viewport() {
        let el = Rect::new(0.0, 750.0, 100.0, 850.0);
        let opts = WatchOptions::new(0.1).with_bottom_margin(-50.0);
        let r = intersection_ratio(el, VIEWPORT, opts.margin);
        assert_eq!(r, 0.0);
    }

    #[test]
    fn zero_area_element_inside_viewport_is_visible() {
        let el = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert_eq!(intersection_ratio(el, VIEWPORT, Insets::ZERO), 1.0);
        let el = Rect::new(10.0, 900.0, 10.0, 900.0);
        assert_eq!(intersection_ratio(el, VIEWPORT, Insets::ZERO), 0.0);
    }

    #[test]
    fn root_margin_css_order() {
        let opts = WatchOptions::new(0.1).with_bottom_margin(-50.0);
        assert_eq!(opts.root_margin(), "0px 0px -50px 0px");
    }

    #[test]
    fn empty_family_gets_no_watcher() {
        assert!(VisibilityWatcher::new(WatchOptions::new(0.5), []).is_none());
    }

    #[test]
    fn reports_each_element_at_most_once() {
        let mut w =
            VisibilityWatcher::new(WatchOptions::new(0.5), [ElementId(0), ElementId(1)]).unwrap();

        assert_eq!(w.observe([entry(0, 0.2), entry(1, 0.0)]), vec![]);
        assert_eq!(w.observe([entry(0, 0.6)]), vec![ElementId(0)]);

        // Leaves and re-enters: nothing new.
        assert_eq!(w.observe([entry(0, 0.0)]), vec![]);
        assert_eq!(w.observe([entry(0, 1.0)]), vec![]);
        assert!(!w.is_watching(ElementId(0)));

        assert_eq!(w.observe([entry(1, 0.5)]), vec![ElementId(1)]);
        assert!(w.is_exhausted());
    }

    #[test]
    fn ratio_just_below_threshold_still_crosses() {
        let mut w = VisibilityWatcher::new(WatchOptions::new(0.1), [ElementId(4)]).unwrap();
        assert_eq!(w.observe([entry(4, 0.0999)]), vec![ElementId(4)]);
    }

    #[test]
    fn zero_threshold_needs_intersection() {
        let mut w = VisibilityWatcher::new(WatchOptions::new(0.0), [ElementId(0)]).unwrap();
        let outside = VisibilityEntry {
            element: ElementId(0),
            ratio: 0.0,
            is_intersecting: false,
        };
        assert_eq!(w.observe([outside]), vec![]);
        let touching = VisibilityEntry {
            is_intersecting: true,
            ..outside
        };
        assert_eq!(w.observe([touching]), vec![ElementId(0)]);
    }

    #[test]
    fn unknown_elements_are_ignored() {
        let mut w = VisibilityWatcher::new(WatchOptions::new(0.5), [ElementId(0)]).unwrap();
        assert_eq!(w.observe([entry(9, 1.0)]), vec![]);
        assert!(w.is_watching(ElementId(0)));
    }

    #[test]
    fn geometry_scroll_in_and_out() {
        let opts = WatchOptions::new(0.1).with_bottom_margin(-50.0);
        let mut w = VisibilityWatcher::new(opts, [ElementId(0)]).unwrap();
        let bounds = |top: f64| [(ElementId(0), Rect::new(0.0, top, 200.0, top + 100.0))];

        // Below the fold.
        assert_eq!(w.observe_geometry(VIEWPORT, bounds(900.0)), vec![]);
        // 20px of a 100px box inside the shrunk viewport (ends at 750).
        assert_eq!(w.observe_geometry(VIEWPORT, bounds(730.0)), vec![ElementId(0)]);
        // Scrolled away and back.
        assert_eq!(w.observe_geometry(VIEWPORT, bounds(-500.0)), vec![]);
        assert_eq!(w.observe_geometry(VIEWPORT, bounds(300.0)), vec![]);
    }

    #[test]
    fn independent_watchers_do_not_interact() {
        let mut fade =
            VisibilityWatcher::new(WatchOptions::new(0.1), [ElementId(0), ElementId(1)]).unwrap();
        let mut bars = VisibilityWatcher::new(WatchOptions::new(0.5), [ElementId(1)]).unwrap();

        assert_eq!(fade.observe([entry(1, 0.3)]), vec![ElementId(1)]);
        assert!(bars.is_watching(ElementId(1)));
        assert_eq!(bars.observe([entry(1, 0.3)]), vec![]);
        assert_eq!(bars.observe([entry(1, 0.6)]), vec![ElementId(1)]);
    }
}
