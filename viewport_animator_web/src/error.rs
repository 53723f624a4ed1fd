// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while wiring the page.

use alloc::string::{String, ToString};
use core::fmt;

use wasm_bindgen::JsValue;

/// Failure to install the animator on the current page.
///
/// Only setup can fail. Once running, per-element DOM failures are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WebError {
    /// There is no global `window` (e.g. running in a worker).
    NoWindow,
    /// The window has no `document`.
    NoDocument,
    /// An `IntersectionObserver` could not be constructed for a family.
    Observer {
        /// Marker attribute of the family.
        marker: &'static str,
        /// Message reported by the browser.
        message: String,
    },
    /// An event listener could not be attached.
    Listener {
        /// Event type, e.g. `"scroll"`.
        event: &'static str,
        /// Message reported by the browser.
        message: String,
    },
    /// The global API object could not be installed on `window`.
    Global {
        /// Message reported by the browser.
        message: String,
    },
}

impl WebError {
    pub(crate) fn observer(marker: &'static str, err: &JsValue) -> Self {
        Self::Observer {
            marker,
            message: describe(err),
        }
    }

    pub(crate) fn listener(event: &'static str, err: &JsValue) -> Self {
        Self::Listener {
            event,
            message: describe(err),
        }
    }

    pub(crate) fn global(err: &JsValue) -> Self {
        Self::Global {
            message: describe(err),
        }
    }
}

/// Best-effort text for a thrown JS value.
fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "unknown error".to_string())
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => f.write_str("no global `window`"),
            Self::NoDocument => f.write_str("window has no `document`"),
            Self::Observer { marker, message } => {
                write!(f, "cannot observe `[{marker}]` elements: {message}")
            }
            Self::Listener { event, message } => {
                write!(f, "cannot listen for `{event}`: {message}")
            }
            Self::Global { message } => write!(f, "cannot install `window.FDTM`: {message}"),
        }
    }
}

impl core::error::Error for WebError {}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_piece() {
        assert_eq!(WebError::NoWindow.to_string(), "no global `window`");
        let err = WebError::Observer {
            marker: "data-counter",
            message: "bad margin".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot observe `[data-counter]` elements: bad margin"
        );
        let err = WebError::Listener {
            event: "scroll",
            message: "denied".into(),
        };
        assert_eq!(err.to_string(), "cannot listen for `scroll`: denied");
    }
}
