// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the effect lifecycle.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`ViewportAnimator`](crate::animator::ViewportAnimator) calls as elements
//! are registered, triggered and animated. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.

use crate::registry::{EffectKind, ElementId};
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when an element joins the animator.
#[derive(Clone, Copy, Debug)]
pub struct RegisteredEvent {
    /// The new element.
    pub element: ElementId,
    /// Its effect.
    pub kind: EffectKind,
}

/// Emitted when a one-shot element crosses its visibility threshold, or a
/// counter is started directly.
#[derive(Clone, Copy, Debug)]
pub struct TriggerEvent {
    /// The triggered element.
    pub element: ElementId,
    /// Its effect.
    pub kind: EffectKind,
    /// When the trigger was observed.
    pub at: HostTime,
    /// When the effect's deferred part runs (equal to `at` when immediate).
    pub due: HostTime,
}

/// Emitted once per animator frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameEvent {
    /// Frame timestamp.
    pub now: HostTime,
    /// Number of changes produced.
    pub changes: usize,
    /// Deferred effects still waiting after this frame.
    pub pending_timers: usize,
    /// Counters still running after this frame.
    pub active_counters: usize,
}

/// Emitted when a counter lands on its target.
#[derive(Clone, Copy, Debug)]
pub struct CounterFinishedEvent {
    /// The counter element.
    pub element: ElementId,
    /// Final value.
    pub target: u64,
    /// Frame timestamp of the final frame.
    pub at: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the animator.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an element is registered.
    fn on_registered(&mut self, e: &RegisteredEvent) {
        _ = e;
    }

    /// Called when an element is triggered.
    fn on_trigger(&mut self, e: &TriggerEvent) {
        _ = e;
    }

    /// Called at the end of each animator frame.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when a counter finishes.
    fn on_counter_finished(&mut self, e: &CounterFinishedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`RegisteredEvent`].
    #[inline]
    pub fn registered(&mut self, e: &RegisteredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_registered(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TriggerEvent`].
    #[inline]
    pub fn trigger(&mut self, e: &TriggerEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_trigger(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CounterFinishedEvent`].
    #[inline]
    pub fn counter_finished(&mut self, e: &CounterFinishedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_counter_finished(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        registered: u32,
        triggers: u32,
        frames: u32,
        finished: u32,
    }

    impl TraceSink for CountingSink {
        fn on_registered(&mut self, _: &RegisteredEvent) {
            self.registered += 1;
        }
        fn on_trigger(&mut self, _: &TriggerEvent) {
            self.triggers += 1;
        }
        fn on_frame(&mut self, _: &FrameEvent) {
            self.frames += 1;
        }
        fn on_counter_finished(&mut self, _: &CounterFinishedEvent) {
            self.finished += 1;
        }
    }

    fn emit_all(tracer: &mut Tracer<'_>) {
        tracer.registered(&RegisteredEvent {
            element: ElementId(0),
            kind: EffectKind::Counter,
        });
        tracer.trigger(&TriggerEvent {
            element: ElementId(0),
            kind: EffectKind::Counter,
            at: HostTime(10),
            due: HostTime(10),
        });
        tracer.frame(&FrameEvent {
            now: HostTime(20),
            changes: 1,
            pending_timers: 0,
            active_counters: 0,
        });
        tracer.counter_finished(&CounterFinishedEvent {
            element: ElementId(0),
            target: 5,
            at: HostTime(20),
        });
    }

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        let mut tracer = Tracer::new(&mut sink);
        emit_all(&mut tracer);
    }

    #[test]
    fn none_tracer_is_silent() {
        emit_all(&mut Tracer::none());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_when_enabled() {
        let mut sink = CountingSink::default();
        emit_all(&mut Tracer::new(&mut sink));
        assert_eq!(
            (sink.registered, sink.triggers, sink.frames, sink.finished),
            (1, 1, 1, 1)
        );
    }

    #[cfg(not(feature = "trace"))]
    #[test]
    fn tracer_compiles_away_when_disabled() {
        let mut sink = CountingSink::default();
        emit_all(&mut Tracer::new(&mut sink));
        assert_eq!(
            (sink.registered, sink.triggers, sink.frames, sink.finished),
            (0, 0, 0, 0)
        );
    }
}
