// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page-facing API, exposed as `window.FDTM`.
//!
//! `formatCurrency` and `scrollToElement` are also exported from the wasm
//! module directly. `animateCounter` needs the running animator, so it only
//! exists on the global.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window};

use viewport_animator_core::format;
use viewport_animator_core::time::Duration;

use crate::error::WebError;
use crate::runtime::Shared;

/// Name of the global namespace object.
pub const GLOBAL: &str = "FDTM";

/// Currency used when the caller passes none.
const DEFAULT_CURRENCY: &str = "EUR";

/// Formats `amount` as a `fr-FR` currency string, e.g. `1 234,50 €`.
///
/// `currency` defaults to `EUR`.
#[wasm_bindgen(js_name = formatCurrency)]
#[must_use]
pub fn format_currency(amount: f64, currency: Option<String>) -> String {
    format::format_currency(amount, &currency_code(currency))
}

/// Smoothly scrolls the first element matching `selector` to the top of
/// the viewport.
///
/// Does nothing if no element matches or the selector is invalid.
#[wasm_bindgen(js_name = scrollToElement)]
pub fn scroll_to_element(selector: &str) {
    let Some(target) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(selector).ok().flatten())
    else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Installs `window.FDTM` with `animateCounter`, `formatCurrency` and
/// `scrollToElement`.
///
/// The closures are handed to the JS garbage collector and live as long as
/// the global does.
pub(crate) fn install_global(shared: &Rc<Shared>, window: &Window) -> Result<(), WebError> {
    let api = js_sys::Object::new();

    let owner = Rc::clone(shared);
    let animate = Closure::wrap(Box::new(move |element: JsValue, target: JsValue, duration: JsValue| {
        let Some(node) = element.dyn_ref::<Element>() else {
            return;
        };
        owner.animate_counter(
            node,
            counter_target(target.as_f64()),
            counter_duration(duration.as_f64()),
        );
    }) as Box<dyn Fn(JsValue, JsValue, JsValue)>);

    let currency = Closure::wrap(Box::new(|amount: JsValue, currency: JsValue| -> String {
        format_currency(amount.as_f64().unwrap_or(f64::NAN), currency.as_string())
    }) as Box<dyn Fn(JsValue, JsValue) -> String>);

    let scroll = Closure::wrap(Box::new(|selector: JsValue| {
        if let Some(selector) = selector.as_string() {
            scroll_to_element(&selector);
        }
    }) as Box<dyn Fn(JsValue)>);

    for (name, function) in [
        ("animateCounter", animate.into_js_value()),
        ("formatCurrency", currency.into_js_value()),
        ("scrollToElement", scroll.into_js_value()),
    ] {
        js_sys::Reflect::set(&api, &JsValue::from_str(name), &function)
            .map_err(|err| WebError::global(&err))?;
    }
    js_sys::Reflect::set(window, &JsValue::from_str(GLOBAL), &api)
        .map_err(|err| WebError::global(&err))?;
    Ok(())
}

/// Counter target from a JS number: the integer part, with `NaN`,
/// infinities and negatives counting as zero.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is finite and positive; the saturating cast floors it"
)]
fn counter_target(raw: Option<f64>) -> u64 {
    raw.filter(|v| v.is_finite() && *v > 0.0)
        .map_or(0, |v| v as u64)
}

/// Explicit counter duration in milliseconds, if the caller passed a usable
/// one.
fn counter_duration(raw: Option<f64>) -> Option<Duration> {
    let ms = raw.filter(|v| v.is_finite() && *v >= 0.0)?;
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is finite and non-negative"
    )]
    let ms = ms as u64;
    Some(Duration::from_millis(ms))
}

fn currency_code(raw: Option<String>) -> String {
    match raw {
        Some(code) if !code.trim().is_empty() => code.trim().to_ascii_uppercase(),
        _ => DEFAULT_CURRENCY.to_string(),
    }
}
