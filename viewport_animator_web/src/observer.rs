// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` wiring.
//!
//! One observer is created per [`WatchPlan`]. Its callback maps each entry's
//! target back to an [`ElementId`], feeds the batch to the animator and
//! unobserves whatever the animator reports as triggered.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use viewport_animator_core::animator::WatchPlan;
use viewport_animator_core::registry::EffectKind;
use viewport_animator_core::visibility::VisibilityEntry;

use crate::error::WebError;
use crate::runtime::Shared;

type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// A live `IntersectionObserver` for one effect family.
///
/// Dropping it disconnects the observer and frees its callback.
pub(crate) struct VisibilityObserver {
    kind: EffectKind,
    observer: IntersectionObserver,
    _callback: ObserverClosure,
}

impl core::fmt::Debug for VisibilityObserver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityObserver")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl VisibilityObserver {
    /// Creates the observer described by `plan` and starts observing its
    /// elements.
    pub(crate) fn install(shared: &Rc<Shared>, plan: &WatchPlan) -> Result<Self, WebError> {
        let kind = plan.kind;
        let marker = kind.marker();

        let owner = Rc::clone(shared);
        let callback: ObserverClosure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                owner.on_intersections(kind, &entries, &observer);
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(plan.options.threshold));
        init.set_root_margin(&plan.options.root_margin());

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|err| WebError::observer(marker, &err))?;

        for &id in &plan.elements {
            if let Some(node) = shared.node(id) {
                observer.observe(&node);
            }
        }

        Ok(Self {
            kind,
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl Shared {
    /// Handles one observer callback batch for `kind`.
    fn on_intersections(
        &self,
        kind: EffectKind,
        entries: &js_sys::Array,
        observer: &IntersectionObserver,
    ) {
        let now = crate::now();
        let triggered = self.with_page(|page| {
            let batch: Vec<VisibilityEntry> = entries
                .iter()
                .filter_map(|value| {
                    let entry: IntersectionObserverEntry = value.unchecked_into();
                    let element = page.find(&entry.target(), kind)?;
                    Some(VisibilityEntry {
                        element,
                        ratio: entry.intersection_ratio(),
                        is_intersecting: entry.is_intersecting(),
                    })
                })
                .collect();
            page.on_visible(kind, batch, now)
        });

        for node in triggered.unwrap_or_default() {
            observer.unobserve(&node);
        }
        self.wake();
    }
}
