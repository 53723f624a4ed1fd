// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Markup`] over live DOM elements.

use alloc::string::String;

use viewport_animator_core::registry::Markup;
use web_sys::Element;

/// Borrowed DOM element viewed through [`Markup`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct DomMarkup<'a>(pub(crate) &'a Element);

impl Markup for DomMarkup<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn has_descendant(&self, selector: &str) -> bool {
        matches!(self.0.query_selector(selector), Ok(Some(_)))
    }

    fn sibling_index(&self) -> usize {
        let mut index = 0;
        let mut cursor = self.0.previous_element_sibling();
        while let Some(prev) = cursor {
            index += 1;
            cursor = prev.previous_element_sibling();
        }
        index
    }
}
