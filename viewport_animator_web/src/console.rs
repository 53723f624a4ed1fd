// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace sink that logs to the browser console.

use alloc::format;
use alloc::string::String;

use viewport_animator_core::trace::{
    CounterFinishedEvent, FrameEvent, RegisteredEvent, TraceSink, TriggerEvent,
};

/// Writes one `console.log` line per lifecycle event.
///
/// Frames that change nothing are skipped to keep the console readable.
/// Events only reach this sink when the `trace` feature is enabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

fn log(line: &str) {
    web_sys::console::log_1(&line.into());
}

pub(crate) fn registered_line(e: &RegisteredEvent) -> String {
    format!("[animator] #{} registered as {}", e.element.0, e.kind.marker())
}

pub(crate) fn trigger_line(e: &TriggerEvent) -> String {
    let delay = e.due.saturating_duration_since(e.at).as_millis();
    format!(
        "[animator] #{} triggered ({}) +{delay}ms",
        e.element.0,
        e.kind.marker()
    )
}

pub(crate) fn frame_line(e: &FrameEvent) -> String {
    format!(
        "[animator] frame @{}ms: {} changes, {} timers, {} counters",
        e.now.ticks() / 1000,
        e.changes,
        e.pending_timers,
        e.active_counters
    )
}

pub(crate) fn counter_line(e: &CounterFinishedEvent) -> String {
    format!("[animator] #{} counter reached {}", e.element.0, e.target)
}

impl TraceSink for ConsoleSink {
    fn on_registered(&mut self, e: &RegisteredEvent) {
        log(&registered_line(e));
    }

    fn on_trigger(&mut self, e: &TriggerEvent) {
        log(&trigger_line(e));
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        if e.changes > 0 {
            log(&frame_line(e));
        }
    }

    fn on_counter_finished(&mut self, e: &CounterFinishedEvent) {
        log(&counter_line(e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewport_animator_core::registry::{EffectKind, ElementId};
    use viewport_animator_core::time::{Duration, HostTime};

    #[test]
    fn trigger_line_reports_delay() {
        let at = HostTime(5_000_000);
        let line = trigger_line(&TriggerEvent {
            element: ElementId(3),
            kind: EffectKind::Progress,
            at,
            due: at + Duration::from_millis(200),
        });
        assert_eq!(line, "[animator] #3 triggered (data-progress) +200ms");
    }

    #[test]
    fn frame_line_in_millis() {
        let line = frame_line(&FrameEvent {
            now: HostTime(16_000),
            changes: 4,
            pending_timers: 1,
            active_counters: 2,
        });
        assert_eq!(
            line,
            "[animator] frame @16ms: 4 changes, 1 timers, 2 counters"
        );
    }
}
