// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll and pointer listeners.

use alloc::boxed::Box;
use alloc::rc::Rc;

use kurbo::{Point, Rect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget, MouseEvent, Window};

use viewport_animator_core::registry::ElementId;

use crate::error::WebError;
use crate::runtime::Shared;

type ListenerClosure = Closure<dyn FnMut(Event)>;

/// An attached DOM event listener, removed again on drop.
pub(crate) struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: ListenerClosure,
}

impl core::fmt::Debug for EventListener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventListener")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

impl EventListener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, WebError> {
        let callback: ListenerClosure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| WebError::listener(event, &err))?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Forwards the window's vertical scroll offset to the parallax
    /// coalescer. The listener is passive.
    pub(crate) fn scroll(shared: &Rc<Shared>, window: &Window) -> Result<Self, WebError> {
        let owner = Rc::clone(shared);
        let source = window.clone();
        Self::attach(window, "scroll", true, move |_| {
            let scroll_y = source.scroll_y().unwrap_or(0.0);
            owner.on_scroll(scroll_y);
        })
    }

    /// Pulls `node` toward the pointer while it hovers.
    pub(crate) fn pointer_move(
        shared: &Rc<Shared>,
        id: ElementId,
        node: &Element,
    ) -> Result<Self, WebError> {
        let owner = Rc::clone(shared);
        let source = node.clone();
        Self::attach(node, "mousemove", true, move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            owner.on_pointer_move(id, pointer, client_bounds(&source));
        })
    }

    /// Returns `node` to rest when the pointer leaves.
    pub(crate) fn pointer_leave(
        shared: &Rc<Shared>,
        id: ElementId,
        node: &Element,
    ) -> Result<Self, WebError> {
        let owner = Rc::clone(shared);
        Self::attach(node, "mouseleave", true, move |_| {
            owner.on_pointer_leave(id);
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Viewport-relative bounds of `node`, in the same space as
/// `MouseEvent.clientX/Y`.
fn client_bounds(node: &Element) -> Rect {
    let r = node.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.right(), r.bottom())
}
