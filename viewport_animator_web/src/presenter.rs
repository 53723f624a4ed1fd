// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Maps [`ElementId`]s to live DOM nodes and applies [`FrameChanges`] to
//! them.

use alloc::vec::Vec;

use viewport_animator_core::backend::Presenter;
use viewport_animator_core::changes::{FrameChanges, Mutation};
use viewport_animator_core::registry::ElementId;
use web_sys::{Element, HtmlElement};

/// The nodes behind one tracked element.
#[derive(Clone, Debug)]
struct Slot {
    /// The marked element: observed, and the target of pointer events.
    node: Element,
    /// The element that receives style changes. For progress bars this is
    /// the fill; otherwise it is `node` itself.
    styled: HtmlElement,
}

/// Applies animator output to DOM elements, slot by [`ElementId`].
pub struct DomPresenter {
    slots: Vec<Option<Slot>>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("slots_len", &self.slots.len())
            .finish()
    }
}

impl DomPresenter {
    /// Creates a presenter with no elements.
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Binds `id` to its marked node and the node its styles land on,
    /// growing the slot table if needed.
    pub fn bind(&mut self, id: ElementId, node: Element, styled: HtmlElement) {
        let slot = id.index();
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        self.slots[slot] = Some(Slot { node, styled });
    }

    /// Returns the marked node for `id`.
    #[must_use]
    pub fn node(&self, id: ElementId) -> Option<&Element> {
        self.slot(id).map(|s| &s.node)
    }

    /// Finds an id bound to exactly `node` that `filter` accepts.
    ///
    /// One node can carry several markers, so callers filter by effect kind.
    pub fn find(
        &self,
        node: &Element,
        mut filter: impl FnMut(ElementId) -> bool,
    ) -> Option<ElementId> {
        self.slots.iter().enumerate().find_map(|(i, slot)| {
            let slot = slot.as_ref()?;
            let id = ElementId(u32::try_from(i).ok()?);
            (slot.node == *node && filter(id)).then_some(id)
        })
    }

    fn slot(&self, id: ElementId) -> Option<&Slot> {
        self.slots.get(id.index()).and_then(|slot| slot.as_ref())
    }
}

impl Default for DomPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for DomPresenter {
    /// Applies each change to its element's styled node; changes for
    /// unbound ids are skipped.
    fn apply(&mut self, changes: &FrameChanges) {
        for change in &changes.changes {
            let Some(slot) = self.slot(change.element) else {
                continue;
            };
            let el = &slot.styled;
            match &change.mutation {
                Mutation::Style { property, value } => {
                    let _ = el.style().set_property(property, value);
                }
                Mutation::AddClass(class) => {
                    let _ = el.class_list().add_1(class);
                }
                Mutation::Text(text) => el.set_text_content(Some(text.as_str())),
            }
        }
    }
}
