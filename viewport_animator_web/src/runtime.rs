// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-level state shared by every browser callback.
//!
//! [`Page`] owns the animator and the presenter. [`Shared`] wraps it with
//! the frame loop, and [`Runtime`] additionally owns the observers and
//! listeners that feed it.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use viewport_animator_core::animator::ViewportAnimator;
use viewport_animator_core::backend::Presenter;
use viewport_animator_core::config::AnimatorConfig;
use viewport_animator_core::format::NumberLocale;
use viewport_animator_core::registry::{
    EffectKind, ElementId, ElementSpec, PROGRESS_FILL_SELECTOR, attr,
};
use viewport_animator_core::time::{Duration, HostTime};
use viewport_animator_core::trace::Tracer;
use viewport_animator_core::visibility::VisibilityEntry;

use crate::api;
use crate::console::ConsoleSink;
use crate::error::WebError;
use crate::listeners::EventListener;
use crate::markup::DomMarkup;
use crate::observer::VisibilityObserver;
use crate::presenter::DomPresenter;
use crate::raf::{FrameControl, RafLoop};

/// The animator together with the DOM nodes it drives.
#[derive(Debug)]
pub(crate) struct Page {
    animator: ViewportAnimator,
    presenter: DomPresenter,
    sink: ConsoleSink,
}

impl Page {
    fn new(config: AnimatorConfig) -> Self {
        Self {
            animator: ViewportAnimator::new(config),
            presenter: DomPresenter::new(),
            sink: ConsoleSink,
        }
    }

    /// Registers every marked element of `document`, family by family.
    ///
    /// Progress bars style their fill; a bar without one is skipped.
    fn discover(&mut self, document: &Document) {
        let mut tracer = Tracer::new(&mut self.sink);
        for kind in EffectKind::ALL {
            let Ok(nodes) = document.query_selector_all(kind.selector()) else {
                continue;
            };
            for i in 0..nodes.length() {
                let Some(node) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let Some(spec) = ElementSpec::discover(kind, &DomMarkup(&node), self.animator.config())
                else {
                    continue;
                };
                let styled = if kind == EffectKind::Progress {
                    node.query_selector(PROGRESS_FILL_SELECTOR).ok().flatten()
                } else {
                    Some(node.clone())
                };
                let Some(styled) = styled.and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
                    continue;
                };
                let id = self.animator.register(spec, &mut tracer);
                self.presenter.bind(id, node, styled);
            }
        }
    }

    /// Applies changes queued outside the frame loop.
    fn flush(&mut self) {
        let changes = self.animator.take_changes();
        self.presenter.apply(&changes);
    }

    fn frame(&mut self, now: HostTime) -> FrameControl {
        let mut tracer = Tracer::new(&mut self.sink);
        let changes = self.animator.tick(now, &mut tracer);
        self.presenter.apply(&changes);
        if self.animator.has_pending_work() {
            FrameControl::Continue
        } else {
            FrameControl::Park
        }
    }

    /// Tracked elements of one kind with their marked nodes.
    fn nodes_of(&self, kind: EffectKind) -> Vec<(ElementId, Element)> {
        (0..self.animator.len())
            .filter_map(|i| {
                let id = ElementId(u32::try_from(i).ok()?);
                (self.animator.kind_of(id) == Some(kind))
                    .then(|| self.presenter.node(id).cloned())
                    .flatten()
                    .map(|node| (id, node))
            })
            .collect()
    }

    /// The id of `node` within the `kind` family.
    pub(crate) fn find(&self, node: &Element, kind: EffectKind) -> Option<ElementId> {
        self.presenter
            .find(node, |id| self.animator.kind_of(id) == Some(kind))
    }

    pub(crate) fn node(&self, id: ElementId) -> Option<Element> {
        self.presenter.node(id).cloned()
    }

    /// Feeds one observer batch for `kind` and returns the nodes that must no
    /// longer be observed.
    pub(crate) fn on_visible(
        &mut self,
        kind: EffectKind,
        batch: Vec<VisibilityEntry>,
        now: HostTime,
    ) -> Vec<Element> {
        let mut tracer = Tracer::new(&mut self.sink);
        let crossed = self.animator.on_visible(kind, batch, now, &mut tracer);
        crossed
            .into_iter()
            .filter_map(|id| self.presenter.node(id).cloned())
            .collect()
    }

    /// Starts a counter on `node` right away.
    ///
    /// A node already tracked as a counter is restarted; any other node is
    /// adopted. The suffix comes from the node's `data-suffix`.
    pub(crate) fn animate_counter(
        &mut self,
        node: &Element,
        target: u64,
        duration: Option<Duration>,
        now: HostTime,
    ) {
        let suffix = node.get_attribute(attr::SUFFIX).unwrap_or_default();
        let duration = duration.unwrap_or(self.animator.config().counter_duration);
        let existing = self.find(node, EffectKind::Counter);
        let mut tracer = Tracer::new(&mut self.sink);
        if let Some(id) = existing {
            self.animator
                .start_counter(id, target, suffix, duration, now, &mut tracer);
        } else if let Some(styled) = node.dyn_ref::<HtmlElement>() {
            let id = self
                .animator
                .adopt_counter(target, suffix, duration, now, &mut tracer);
            self.presenter.bind(id, node.clone(), styled.clone());
        }
    }
}

/// [`Page`] plus the frame loop that advances it.
#[derive(Debug)]
pub(crate) struct Shared {
    page: RefCell<Page>,
    raf: RafLoop,
}

impl Shared {
    fn new(page: Page) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            Self {
                page: RefCell::new(page),
                raf: RafLoop::new(move |now| {
                    weak.upgrade()
                        .map_or(FrameControl::Park, |shared| shared.frame(now))
                }),
            }
        })
    }

    /// Runs `f` with the page borrowed mutably.
    ///
    /// Returns `None` if the page is already borrowed, which only happens
    /// when a callback re-enters another one.
    pub(crate) fn with_page<R>(&self, f: impl FnOnce(&mut Page) -> R) -> Option<R> {
        let mut page = self.page.try_borrow_mut().ok()?;
        Some(f(&mut page))
    }

    pub(crate) fn node(&self, id: ElementId) -> Option<Element> {
        self.page.try_borrow().ok()?.node(id)
    }

    fn frame(&self, now: HostTime) -> FrameControl {
        self.with_page(|page| page.frame(now))
            .unwrap_or(FrameControl::Continue)
    }

    /// Starts the frame loop if the animator has work queued.
    pub(crate) fn wake(&self) {
        let busy = self
            .with_page(|page| page.animator.has_pending_work())
            .unwrap_or(false);
        if busy {
            self.raf.start();
        }
    }

    pub(crate) fn on_scroll(&self, scroll_y: f64) {
        let needs_frame = self
            .with_page(|page| page.animator.on_scroll(scroll_y))
            .unwrap_or(false);
        if needs_frame {
            self.raf.start();
        }
    }

    pub(crate) fn on_pointer_move(&self, id: ElementId, pointer: Point, bounds: Rect) {
        self.with_page(|page| page.animator.pointer_move(id, pointer, bounds));
        self.wake();
    }

    pub(crate) fn on_pointer_leave(&self, id: ElementId) {
        self.with_page(|page| page.animator.pointer_leave(id));
        self.wake();
    }

    pub(crate) fn animate_counter(&self, node: &Element, target: u64, duration: Option<Duration>) {
        let now = crate::now();
        self.with_page(|page| page.animate_counter(node, target, duration, now));
        self.wake();
    }
}

/// Everything installed on the page.
#[derive(Debug)]
pub(crate) struct Runtime {
    _shared: Rc<Shared>,
    _observers: Vec<VisibilityObserver>,
    _listeners: Vec<EventListener>,
}

impl Runtime {
    /// Discovers marked elements and wires observers, listeners and the
    /// `window.FDTM` global.
    ///
    /// Initial styles are applied only once every piece is in place, so a
    /// failure leaves the page untouched.
    pub(crate) fn install() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        let locale = window
            .navigator()
            .language()
            .map_or(NumberLocale::En, |tag| NumberLocale::from_tag(&tag));

        let mut page = Page::new(AnimatorConfig::new().with_locale(locale));
        page.discover(&document);
        let parallax = page.nodes_of(EffectKind::Parallax);
        let magnetic = page.nodes_of(EffectKind::Magnetic);
        let plans = page.animator.watch_plan();
        let shared = Shared::new(page);

        let observers = plans
            .iter()
            .map(|plan| VisibilityObserver::install(&shared, plan))
            .collect::<Result<Vec<_>, _>>()?;

        let mut listeners = Vec::new();
        if !parallax.is_empty() {
            listeners.push(EventListener::scroll(&shared, &window)?);
        }
        for (id, node) in &magnetic {
            listeners.push(EventListener::pointer_move(&shared, *id, node)?);
            listeners.push(EventListener::pointer_leave(&shared, *id, node)?);
        }

        api::install_global(&shared, &window)?;

        shared.with_page(Page::flush);
        if !parallax.is_empty() {
            shared.on_scroll(window.scroll_y().unwrap_or(0.0));
        }
        shared.wake();

        Ok(Self {
            _shared: shared,
            _observers: observers,
            _listeners: listeners,
        })
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;

    use alloc::string::String;

    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const MS: u64 = 1000;

    /// Markup appended to `document.body` for one test, removed on drop.
    struct Fixture {
        document: Document,
        root: Element,
    }

    impl Fixture {
        fn new(html: &str) -> Self {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .expect("browser document");
            let root = document.create_element("div").expect("create root");
            root.set_inner_html(html);
            document
                .body()
                .expect("document body")
                .append_child(&root)
                .expect("attach root");
            Self { document, root }
        }

        fn get(&self, selector: &str) -> HtmlElement {
            self.root
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .expect("fixture element")
        }

        fn page(&self) -> Page {
            let mut page = Page::new(AnimatorConfig::new());
            page.discover(&self.document);
            page.flush();
            page
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            self.root.remove();
        }
    }

    fn style(el: &HtmlElement, property: &str) -> String {
        el.style().get_property_value(property).unwrap_or_default()
    }

    fn seen(page: &Page, node: &Element, kind: EffectKind) -> VisibilityEntry {
        VisibilityEntry {
            element: page.find(node, kind).expect("tracked node"),
            ratio: 1.0,
            is_intersecting: true,
        }
    }

    #[wasm_bindgen_test]
    fn progress_fill_grows_after_buffer() {
        let fixture = Fixture::new(
            r#"<div id="bar" data-progress="75"><div class="progress-bar-fill"></div></div>"#,
        );
        let bar = fixture.get("#bar");
        let fill = fixture.get(".progress-bar-fill");
        let mut page = fixture.page();
        assert_eq!(style(&fill, "width"), "0%");

        let t0 = HostTime(10_000 * MS);
        let entry = seen(&page, &bar, EffectKind::Progress);
        page.on_visible(EffectKind::Progress, alloc::vec![entry], t0);
        page.frame(t0 + Duration::from_millis(100));
        assert_eq!(style(&fill, "width"), "0%");
        page.frame(t0 + Duration::from_millis(200));
        assert_eq!(style(&fill, "width"), "75%");
    }

    #[wasm_bindgen_test]
    fn triggered_nodes_are_handed_back_for_unobserving() {
        let fixture = Fixture::new(r#"<p id="fade" data-animate>hello</p>"#);
        let fade = fixture.get("#fade");
        let mut page = fixture.page();
        assert_eq!(page.animator.watch_plan().len(), 1);

        let t0 = HostTime(MS);
        let entry = seen(&page, &fade, EffectKind::FadeInUp);
        let release = page.on_visible(EffectKind::FadeInUp, alloc::vec![entry], t0);
        assert_eq!(release.len(), 1, "one node to unobserve");
        let fade_node: &Element = fade.as_ref();
        assert_eq!(&release[0], fade_node, "the revealed node itself");
        assert!(page.animator.watch_plan().is_empty(), "family is done");

        let again = page.on_visible(EffectKind::FadeInUp, alloc::vec![entry], t0);
        assert!(again.is_empty(), "a revealed node never triggers twice");
    }

    #[wasm_bindgen_test]
    fn siblings_reveal_staggered() {
        let fixture = Fixture::new(
            r#"<section><div id="a" data-reveal></div><div id="b" data-reveal></div></section>"#,
        );
        let first = fixture.get("#a");
        let second = fixture.get("#b");
        let mut page = fixture.page();
        assert_eq!(style(&first, "opacity"), "0");
        assert_eq!(style(&second, "opacity"), "0");

        let t0 = HostTime(50_000 * MS);
        let batch = alloc::vec![
            seen(&page, &first, EffectKind::SmoothReveal),
            seen(&page, &second, EffectKind::SmoothReveal),
        ];
        page.on_visible(EffectKind::SmoothReveal, batch, t0);

        page.frame(t0 + Duration::from_millis(50));
        assert_eq!(style(&first, "opacity"), "1");
        assert_eq!(style(&second, "opacity"), "0");

        page.frame(t0 + Duration::from_millis(100));
        assert_eq!(style(&second, "opacity"), "1");
    }

    #[wasm_bindgen_test]
    fn global_exposes_page_functions() {
        let fixture = Fixture::new(r#"<span id="stat" data-suffix="+">0</span>"#);
        let stat = fixture.get("#stat");
        let window = web_sys::window().expect("browser window");
        let shared = Shared::new(Page::new(AnimatorConfig::new()));
        api::install_global(&shared, &window).expect("install global");

        let global = js_sys::Reflect::get(&window, &JsValue::from_str(api::GLOBAL))
            .expect("window.FDTM");
        let function = |name: &str| -> js_sys::Function {
            js_sys::Reflect::get(&global, &JsValue::from_str(name))
                .ok()
                .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
                .unwrap_or_else(|| panic!("FDTM.{name} is a function"))
        };

        let formatted = function("formatCurrency")
            .call2(&JsValue::NULL, &JsValue::from_f64(1234.5), &JsValue::from_str("EUR"))
            .expect("formatCurrency call");
        assert_eq!(formatted.as_string().as_deref(), Some("1\u{202f}234,50\u{a0}€"));

        function("animateCounter")
            .call3(
                &JsValue::NULL,
                stat.as_ref(),
                &JsValue::from_f64(1500.0),
                &JsValue::from_f64(0.0),
            )
            .expect("animateCounter call");
        shared.with_page(|page| page.frame(crate::now()));
        assert_eq!(stat.text_content().as_deref(), Some("1,500+"));

        function("scrollToElement")
            .call1(&JsValue::NULL, &JsValue::from_str("#stat"))
            .expect("scrollToElement call");
    }

    #[wasm_bindgen_test]
    fn scroll_to_missing_or_invalid_selector_is_a_no_op() {
        api::scroll_to_element("#nothing-here");
        api::scroll_to_element("[[not a selector");
    }
}
