// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! The core splits platform-specific work into a *backend* crate. A backend
//! provides the following pieces:
//!
//! - **Discovery**: Finds marked elements, wraps each in a
//!   [`Markup`](crate::registry::Markup) view, and registers the resulting
//!   [`ElementSpec`](crate::registry::ElementSpec)s.
//!
//! - **Visibility**: One platform observer per entry of
//!   [`ViewportAnimator::watch_plan`], translating observations into
//!   [`VisibilityEntry`](crate::visibility::VisibilityEntry) values and
//!   unobserving the elements the animator reports back.
//!
//! - **Frame source**: Produces frame timestamps (e.g.
//!   `requestAnimationFrame`) while
//!   [`ViewportAnimator::has_pending_work`] is true. This is not abstracted
//!   by a trait because setup and lifecycle are platform-specific.
//!
//! - **Input**: Forwards scroll positions and pointer movement.
//!
//! - **Presenter**: Implements the [`Presenter`] trait to apply
//!   [`FrameChanges`] to native elements.
//!
//! [`ViewportAnimator::watch_plan`]: crate::animator::ViewportAnimator::watch_plan
//! [`ViewportAnimator::has_pending_work`]: crate::animator::ViewportAnimator::has_pending_work

use crate::changes::FrameChanges;

/// Applies animator output to a platform-native element tree.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(timestamp: HostTime) {
///     let changes = animator.tick(timestamp, &mut tracer);
///     presenter.apply(&changes);
///     if !animator.has_pending_work() {
///         frame_source.stop();
///     }
/// }
/// ```
pub trait Presenter {
    /// Applies `changes` in order.
    fn apply(&mut self, changes: &FrameChanges);
}
