// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core model for viewport-triggered page effects.
//!
//! `viewport_animator_core` decides *what* a page's decorative effects do
//! and *when*; a backend crate decides *how* that reaches the screen. It is
//! `no_std` compatible (with `alloc`) and never touches a DOM, so every
//! effect can be exercised with fake observers, clocks and presenters.
//!
//! # Architecture
//!
//! ```text
//!   Backend discovery ──► ElementSpec::discover() ──► ViewportAnimator::register()
//!                                                            │
//!   Observer entries ──► ViewportAnimator::on_visible() ─────┤
//!   Scroll / pointer ──► on_scroll() / pointer_move() ───────┤
//!   Frame timestamp  ──► ViewportAnimator::tick() ───────────┤
//!                                                            ▼
//!                                   FrameChanges ──► Presenter::apply()
//! ```
//!
//! **[`registry`]**: Effect kinds, marker attributes and parameter parsing
//! with defaults.
//!
//! **[`visibility`]**: One-shot [`VisibilityWatcher`](visibility::VisibilityWatcher)
//! per effect family, plus intersection-ratio geometry.
//!
//! **[`animator`]**: The [`ViewportAnimator`](animator::ViewportAnimator)
//! state machine.
//!
//! **[`reveal`]**, **[`counter`]**, **[`parallax`]**, **[`magnetic`]**: The
//! individual effects.
//!
//! **[`format`]**: Digit grouping and `fr-FR` currency formatting.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait and the
//! contract a platform backend fulfills.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and lifecycle
//! events, with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animator;
pub mod backend;
pub mod changes;
pub mod config;
pub mod counter;
pub mod format;
pub mod magnetic;
pub mod parallax;
pub mod registry;
pub mod reveal;
pub mod time;
pub mod trace;
pub mod visibility;
