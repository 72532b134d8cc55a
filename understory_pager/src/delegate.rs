// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callbacks.

use core::fmt::Debug;
use core::hash::Hash;

use understory_gesture::GestureInfo;

use crate::pager::Pager;

/// Handle type usable as a view key.
///
/// Blanket-implemented; hosts typically use a small id such as a generational
/// node handle.
pub trait ViewKey: Copy + Eq + Hash + Debug + 'static {}

impl<T> ViewKey for T where T: Copy + Eq + Hash + Debug + 'static {}

/// Callbacks a host implements to observe a [`Pager`].
///
/// The count and displayed-page callbacks are required; the gesture callbacks
/// default to doing nothing.
///
/// Every callback receives the pager itself, so the host may mutate it from
/// inside a callback (for example removing the view that was just tapped).
/// Notifications caused by such a reentrant call are delivered after the
/// current one returns, in order. Indices passed to callbacks are resolved at
/// delivery time; a gesture or page notification whose view has been removed
/// in the meantime is dropped.
pub trait PagerDelegate<V: ViewKey> {
    /// The number of views changed (or a view was replaced).
    fn views_count_changed(&mut self, pager: &mut Pager<V>, count: usize);

    /// A different page became the displayed one.
    fn displayed_view_changed(&mut self, pager: &mut Pager<V>, view: V, index: usize);

    /// A single tap was recognized on `view`.
    fn tap(&mut self, pager: &mut Pager<V>, view: V, index: usize, info: &GestureInfo) {
        let _ = (pager, view, index, info);
    }

    /// A double tap was recognized on `view`.
    fn double_tap(&mut self, pager: &mut Pager<V>, view: V, index: usize, info: &GestureInfo) {
        let _ = (pager, view, index, info);
    }

    /// A pan update on `view`; `info.phase` tells where in the gesture it is.
    fn pan(&mut self, pager: &mut Pager<V>, view: V, index: usize, info: &GestureInfo) {
        let _ = (pager, view, index, info);
    }

    /// A pinch update on `view`; `info.scale` carries the scale.
    fn pinch(&mut self, pager: &mut Pager<V>, view: V, index: usize, info: &GestureInfo) {
        let _ = (pager, view, index, info);
    }

    /// A long-press update on `view`.
    fn long_press(&mut self, pager: &mut Pager<V>, view: V, index: usize, info: &GestureInfo) {
        let _ = (pager, view, index, info);
    }
}
