// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The effect state machine.
//!
//! [`ViewportAnimator`] owns every tracked element and turns platform events
//! into [`FrameChanges`]:
//!
//! ```text
//!   register() ──► hidden styles
//!   on_visible() ──► VisibilityWatcher ──► trigger ──► deferred reveal / fill
//!                                               └────► counter start
//!   on_scroll() ──► ScrollCoalescer ─┐
//!   tick(now) ◄──────────────────────┴─ due reveals, fills, counter frames,
//!                                       parallax offsets
//!   pointer_move() / pointer_leave() ──► magnetic translation
//! ```
//!
//! Event handlers queue their immediate changes; collect them with
//! [`take_changes`](ViewportAnimator::take_changes). Time-driven changes are
//! returned by [`tick`](ViewportAnimator::tick), which the backend calls
//! once per rendered frame for as long as
//! [`has_pending_work`](ViewportAnimator::has_pending_work) holds.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use kurbo::{Point, Rect};

use crate::changes::FrameChanges;
use crate::config::AnimatorConfig;
use crate::counter::CounterAnimation;
use crate::magnetic::{REST, magnetic_pull, translate};
use crate::parallax::{ScrollCoalescer, parallax_offset, translate_y};
use crate::registry::{EffectKind, EffectParams, ElementId, ElementSpec};
use crate::reveal::{RevealStyle, fill_progress, reset_progress};
use crate::time::{Duration, HostTime};
use crate::trace::{CounterFinishedEvent, FrameEvent, RegisteredEvent, Tracer, TriggerEvent};
use crate::visibility::{VisibilityEntry, VisibilityWatcher, WatchOptions};

/// One observer the backend must create: a family, its options and the
/// elements to observe.
#[derive(Clone, Debug, PartialEq)]
pub struct WatchPlan {
    /// Effect family.
    pub kind: EffectKind,
    /// Threshold and margin.
    pub options: WatchOptions,
    /// Elements still waiting for their trigger.
    pub elements: Vec<ElementId>,
}

/// Work deferred to a later frame.
#[derive(Clone, Copy, Debug)]
enum Deferred {
    Reveal(RevealStyle),
    Fill(u8),
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    due: HostTime,
    element: ElementId,
    action: Deferred,
}

/// Tracks marked elements and produces their style changes.
#[derive(Debug)]
pub struct ViewportAnimator {
    config: AnimatorConfig,
    elements: Vec<ElementSpec>,
    watchers: BTreeMap<EffectKind, VisibilityWatcher>,
    timers: Vec<Timer>,
    counters: Vec<(ElementId, CounterAnimation)>,
    parallax: Vec<(ElementId, f64)>,
    scroll: ScrollCoalescer,
    pending: FrameChanges,
}

impl ViewportAnimator {
    /// Creates an animator with no elements.
    #[must_use]
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
            watchers: BTreeMap::new(),
            timers: Vec::new(),
            counters: Vec::new(),
            parallax: Vec::new(),
            scroll: ScrollCoalescer::new(),
            pending: FrameChanges::new(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Number of tracked elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Effect of a tracked element.
    #[must_use]
    pub fn kind_of(&self, element: ElementId) -> Option<EffectKind> {
        self.elements.get(element.index()).map(|spec| spec.kind)
    }

    /// Starts tracking an element and queues its initial state.
    ///
    /// One-shot kinds join their family's watcher, which is created on the
    /// family's first element.
    pub fn register(&mut self, spec: ElementSpec, tracer: &mut Tracer<'_>) -> ElementId {
        let id = self.next_id();
        let kind = spec.kind;

        match &spec.params {
            EffectParams::Reveal { .. } => {
                if let Some(style) = RevealStyle::for_kind(kind) {
                    style.hide(id, &mut self.pending);
                }
            }
            EffectParams::Progress { .. } => reset_progress(id, &mut self.pending),
            EffectParams::Parallax { speed } => self.parallax.push((id, *speed)),
            EffectParams::Counter { .. } | EffectParams::Magnetic => {}
        }

        if let Some(options) = self.config.watch_options(kind) {
            match self.watchers.get_mut(&kind) {
                Some(watcher) => watcher.watch(id),
                None => {
                    if let Some(watcher) = VisibilityWatcher::new(options, [id]) {
                        self.watchers.insert(kind, watcher);
                    }
                }
            }
        }

        self.elements.push(spec);
        tracer.registered(&RegisteredEvent { element: id, kind });
        id
    }

    /// Observers the backend must create, one per family with elements.
    #[must_use]
    pub fn watch_plan(&self) -> Vec<WatchPlan> {
        self.watchers
            .iter()
            .filter(|(_, w)| !w.is_exhausted())
            .map(|(&kind, w)| WatchPlan {
                kind,
                options: w.options(),
                elements: w.watched().collect(),
            })
            .collect()
    }

    /// Feeds observations for one family.
    ///
    /// Returns the elements triggered by this call; the backend should stop
    /// observing them. Families without a watcher ignore all entries.
    pub fn on_visible(
        &mut self,
        kind: EffectKind,
        entries: impl IntoIterator<Item = VisibilityEntry>,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Vec<ElementId> {
        let Some(watcher) = self.watchers.get_mut(&kind) else {
            return Vec::new();
        };
        let crossed = watcher.observe(entries);
        if watcher.is_exhausted() {
            self.watchers.remove(&kind);
        }
        for &id in &crossed {
            self.trigger(id, now, tracer);
        }
        crossed
    }

    /// Computes visibility from geometry for every family at once.
    ///
    /// `bounds` holds viewport-relative rectangles; elements a family does
    /// not watch are ignored by that family.
    pub fn on_geometry(
        &mut self,
        viewport: Rect,
        bounds: &[(ElementId, Rect)],
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Vec<ElementId> {
        let mut crossed = Vec::new();
        for watcher in self.watchers.values_mut() {
            crossed.extend(watcher.observe_geometry(viewport, bounds.iter().copied()));
        }
        self.watchers.retain(|_, w| !w.is_exhausted());
        for &id in &crossed {
            self.trigger(id, now, tracer);
        }
        crossed
    }

    fn trigger(&mut self, id: ElementId, now: HostTime, tracer: &mut Tracer<'_>) {
        let Some(spec) = self.elements.get(id.index()) else {
            return;
        };
        let kind = spec.kind;
        let due = match spec.params.clone() {
            EffectParams::Reveal { delay } => {
                let Some(style) = RevealStyle::for_kind(kind) else {
                    return;
                };
                self.schedule(now, delay, id, Deferred::Reveal(style))
            }
            EffectParams::Progress { percent } => {
                self.schedule(now, self.config.progress_buffer, id, Deferred::Fill(percent))
            }
            EffectParams::Counter {
                target,
                suffix,
                duration,
            } => {
                let counter = CounterAnimation::new(target, suffix, duration, self.config.locale);
                self.replace_counter(id, counter);
                now
            }
            EffectParams::Parallax { .. } | EffectParams::Magnetic => return,
        };
        tracer.trigger(&TriggerEvent {
            element: id,
            kind,
            at: now,
            due,
        });
    }

    fn schedule(&mut self, now: HostTime, delay: Duration, element: ElementId, action: Deferred) -> HostTime {
        let due = now.saturating_add(delay);
        self.timers.push(Timer {
            due,
            element,
            action,
        });
        due
    }

    fn replace_counter(&mut self, element: ElementId, counter: CounterAnimation) {
        self.counters.retain(|(id, _)| *id != element);
        self.counters.push((element, counter));
    }

    fn next_id(&self) -> ElementId {
        ElementId(u32::try_from(self.elements.len()).unwrap_or(u32::MAX))
    }

    /// Starts (or restarts) a counter on a tracked element right away,
    /// bypassing visibility.
    ///
    /// The element stops waiting for its own trigger. Unknown ids are
    /// ignored.
    pub fn start_counter(
        &mut self,
        element: ElementId,
        target: u64,
        suffix: String,
        duration: Duration,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) {
        let Some(kind) = self.kind_of(element) else {
            return;
        };
        if let Some(watcher) = self.watchers.get_mut(&kind) {
            watcher.forget(element);
        }
        self.watchers.retain(|_, w| !w.is_exhausted());
        self.replace_counter(
            element,
            CounterAnimation::new(target, suffix, duration, self.config.locale),
        );
        tracer.trigger(&TriggerEvent {
            element,
            kind,
            at: now,
            due: now,
        });
    }

    /// Tracks a new, unmarked element and starts a counter on it.
    pub fn adopt_counter(
        &mut self,
        target: u64,
        suffix: String,
        duration: Duration,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> ElementId {
        let id = self.next_id();
        self.elements.push(ElementSpec {
            kind: EffectKind::Counter,
            params: EffectParams::Counter {
                target,
                suffix: suffix.clone(),
                duration,
            },
        });
        tracer.registered(&RegisteredEvent {
            element: id,
            kind: EffectKind::Counter,
        });
        self.start_counter(id, target, suffix, duration, now, tracer);
        id
    }

    /// Records a scroll position.
    ///
    /// Returns `true` when the backend must request a frame: the first
    /// scroll since the last frame, and only if parallax elements exist.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        if self.parallax.is_empty() {
            return false;
        }
        self.scroll.record(scroll_y)
    }

    /// Pulls a magnetic element toward the pointer.
    ///
    /// `pointer` and `bounds` share one coordinate space. Other kinds are
    /// ignored.
    pub fn pointer_move(&mut self, element: ElementId, pointer: Point, bounds: Rect) {
        if self.kind_of(element) != Some(EffectKind::Magnetic) {
            return;
        }
        let pull = magnetic_pull(pointer, bounds, self.config.magnetic_damping);
        self.pending.style(element, "transform", translate(pull));
    }

    /// Returns a magnetic element to rest.
    pub fn pointer_leave(&mut self, element: ElementId) {
        if self.kind_of(element) != Some(EffectKind::Magnetic) {
            return;
        }
        self.pending.style(element, "transform", REST);
    }

    /// Drains changes queued by event handlers.
    pub fn take_changes(&mut self) -> FrameChanges {
        mem::take(&mut self.pending)
    }

    /// Returns `true` while frames are needed: deferred effects, running
    /// counters, a coalesced scroll, or undrained changes.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.timers.is_empty()
            || !self.counters.is_empty()
            || self.scroll.is_pending()
            || !self.pending.is_empty()
    }

    /// Advances to `now` and returns everything to apply this frame.
    pub fn tick(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> FrameChanges {
        let mut out = self.take_changes();

        let (mut due, later): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = later;
        due.sort_by_key(|t| t.due);
        for timer in due {
            match timer.action {
                Deferred::Reveal(style) => style.reveal(timer.element, &mut out),
                Deferred::Fill(percent) => fill_progress(timer.element, percent, &mut out),
            }
        }

        self.counters.retain_mut(|(id, counter)| {
            let frame = counter.sample(now);
            out.text(*id, frame.text);
            if frame.finished {
                tracer.counter_finished(&CounterFinishedEvent {
                    element: *id,
                    target: frame.value,
                    at: now,
                });
            }
            !frame.finished
        });

        if let Some(scroll_y) = self.scroll.take() {
            for &(id, speed) in &self.parallax {
                out.style(id, "transform", translate_y(parallax_offset(scroll_y, speed)));
            }
        }

        tracer.frame(&FrameEvent {
            now,
            changes: out.len(),
            pending_timers: self.timers.len(),
            active_counters: self.counters.len(),
        });
        out
    }
}
