// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style mutations emitted by the animator.
//!
//! The animator never touches the DOM. Every visible effect is expressed as
//! a [`Change`] (one [`Mutation`] for one element) collected into
//! [`FrameChanges`] and handed to a
//! [`Presenter`](crate::backend::Presenter).

use alloc::string::String;
use alloc::vec::Vec;

use crate::registry::ElementId;

/// One DOM-level effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Sets an inline style property.
    Style {
        /// CSS property name, e.g. `opacity`.
        property: &'static str,
        /// CSS value.
        value: String,
    },
    /// Adds a class to the element's class list.
    AddClass(&'static str),
    /// Replaces the element's text content.
    Text(String),
}

/// A mutation addressed to one tracked element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Change {
    /// Target element.
    pub element: ElementId,
    /// What to do to it.
    pub mutation: Mutation,
}

/// Ordered batch of changes, applied front to back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameChanges {
    /// Changes in application order.
    pub changes: Vec<Change>,
}

impl FrameChanges {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Queues an inline style update.
    pub fn style(&mut self, element: ElementId, property: &'static str, value: impl Into<String>) {
        self.changes.push(Change {
            element,
            mutation: Mutation::Style {
                property,
                value: value.into(),
            },
        });
    }

    /// Queues a class addition.
    pub fn add_class(&mut self, element: ElementId, class: &'static str) {
        self.changes.push(Change {
            element,
            mutation: Mutation::AddClass(class),
        });
    }

    /// Queues a text update.
    pub fn text(&mut self, element: ElementId, text: String) {
        self.changes.push(Change {
            element,
            mutation: Mutation::Text(text),
        });
    }

    /// Last value written to `property` on `element`, if any.
    #[must_use]
    pub fn last_style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.changes.iter().rev().find_map(|c| match &c.mutation {
            Mutation::Style { property: p, value } if c.element == element && *p == property => {
                Some(value.as_str())
            }
            _ => None,
        })
    }

    /// Last text written to `element`, if any.
    #[must_use]
    pub fn last_text(&self, element: ElementId) -> Option<&str> {
        self.changes.iter().rev().find_map(|c| match &c.mutation {
            Mutation::Text(t) if c.element == element => Some(t.as_str()),
            _ => None,
        })
    }
}
