// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paging container controller.

use core::fmt;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use kurbo::{Point, Rect, Size};
use understory_gesture::{
    GestureEvent, GestureFlags, GestureInfo, GestureKind, GesturePhase, GestureRegistry,
    Recognizer, RecognizerId, TapArbiter,
};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::collection::ViewCollection;
use crate::config::PagerConfig;
use crate::delegate::{PagerDelegate, ViewKey};
use crate::error::PagerError;
use crate::layout::PagingLayout;
use crate::page::{PageChange, PageTracker};

/// Non-owning link to the host's delegate.
type DelegateLink<V> = Weak<RefCell<dyn PagerDelegate<V>>>;

/// A scroll the host should perform on its scrolling surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    /// Target content offset.
    pub offset: Point,
    /// Whether the transition should be eased rather than instantaneous.
    pub animated: bool,
}

#[derive(Clone, Copy, Debug)]
enum Notice<V> {
    CountChanged(usize),
    DisplayedChanged { view: V, index: usize },
    Gesture {
        kind: GestureKind,
        view: V,
        info: GestureInfo,
    },
}

/// An active long press holding single taps off.
#[derive(Clone, Copy, Debug)]
struct TapSuppression<V> {
    view: V,
    long_press: RecognizerId,
    /// Tap flag to put back when the press is over.
    restore_tap: bool,
}

/// A horizontally paging container over host-supplied views.
///
/// `Pager` composes a [`ViewCollection`] (views plus page slots), a
/// [`GestureRegistry`] driven by per-instance [`GestureFlags`], a
/// [`TapArbiter`], and a [`PageTracker`]. It owns no platform objects: the host
///
/// - mirrors [`frame`](Self::frame) / [`content_size`](Self::content_size)
///   onto its scrolling surface,
/// - creates platform recognizers for the ids in
///   [`recognizers`](Self::recognizers),
/// - forwards drag starts, scroll offsets and recognizer updates via
///   [`begin_drag`](Self::begin_drag), [`did_scroll`](Self::did_scroll) and
///   [`handle_gesture`](Self::handle_gesture),
/// - performs the scrolls returned by
///   [`take_scroll_request`](Self::take_scroll_request).
///
/// Notifications go to an optional [`PagerDelegate`] held through a weak
/// link; once the host drops the delegate, callbacks become no-ops.
pub struct Pager<V: ViewKey> {
    views: ViewCollection<V>,
    gestures: GestureRegistry<V>,
    arbiter: TapArbiter<V, GestureInfo>,
    flags: GestureFlags,
    suppressing: Option<TapSuppression<V>>,
    page: PageTracker,
    config: PagerConfig,
    scroll_request: Option<ScrollRequest>,
    delegate: Option<DelegateLink<V>>,
    outbox: VecDeque<Notice<V>>,
    dispatching: bool,
}

impl<V: ViewKey> fmt::Debug for Pager<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("views", &self.views)
            .field("gestures", &self.gestures)
            .field("flags", &self.flags)
            .field("suppressing", &self.suppressing)
            .field("page", &self.page)
            .field("config", &self.config)
            .field("scroll_request", &self.scroll_request)
            .field("has_delegate", &self.has_delegate())
            .field("queued", &self.outbox.len())
            .finish_non_exhaustive()
    }
}

impl<V: ViewKey> Pager<V> {
    /// Creates an empty pager for a container of the given size.
    #[must_use]
    pub fn new(container: Size) -> Self {
        Self::with_config(container, PagerConfig::default())
    }

    /// Creates an empty pager with explicit configuration.
    #[must_use]
    pub fn with_config(container: Size, config: PagerConfig) -> Self {
        Self {
            views: ViewCollection::new(container),
            gestures: GestureRegistry::new(),
            arbiter: TapArbiter::new(),
            flags: GestureFlags::empty(),
            suppressing: None,
            page: PageTracker::new(),
            config,
            scroll_request: None,
            delegate: None,
            outbox: VecDeque::new(),
            dispatching: false,
        }
    }

    // --- delegate -------------------------------------------------------

    /// Registers `delegate` without taking ownership of it.
    pub fn set_delegate<D>(&mut self, delegate: &Rc<RefCell<D>>)
    where
        D: PagerDelegate<V> + 'static,
    {
        let delegate: Rc<RefCell<dyn PagerDelegate<V>>> = delegate.clone();
        self.delegate = Some(Rc::downgrade(&delegate));
    }

    /// Unregisters the delegate and drops undelivered notifications.
    pub fn clear_delegate(&mut self) {
        self.delegate = None;
        self.outbox.clear();
    }

    /// Returns `true` if a delegate is registered and still alive.
    #[must_use]
    pub fn has_delegate(&self) -> bool {
        self.delegate
            .as_ref()
            .is_some_and(|link| link.strong_count() > 0)
    }

    // --- configuration --------------------------------------------------

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> PagerConfig {
        self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: PagerConfig) {
        self.config = config;
    }

    /// Whether scroll requests are animated.
    #[must_use]
    pub fn animated(&self) -> bool {
        self.config.animated
    }

    /// Sets whether scroll requests are animated.
    pub fn set_animated(&mut self, animated: bool) {
        self.config.animated = animated;
    }

    /// Whether the displayed page is resolved by rounding.
    #[must_use]
    pub fn round_page_on_display(&self) -> bool {
        self.config.round_page_on_display
    }

    /// Sets whether the displayed page is resolved by rounding.
    pub fn set_round_page_on_display(&mut self, round: bool) {
        self.config.round_page_on_display = round;
    }

    /// Whether inserting a view requests a scroll to it.
    #[must_use]
    pub fn move_on_add(&self) -> bool {
        self.config.move_on_add
    }

    /// Sets whether inserting a view requests a scroll to it.
    pub fn set_move_on_add(&mut self, move_on_add: bool) {
        self.config.move_on_add = move_on_add;
    }

    // --- geometry -------------------------------------------------------

    /// The container (viewport) size.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.views.layout().container_size()
    }

    /// Applies the host's layout pass: every slot and the content size
    /// follow the new container size.
    pub fn set_container_size(&mut self, container: Size) {
        self.views.set_container_size(container);
    }

    /// Scrollable extent.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.views.layout().content_size()
    }

    /// Page slots.
    #[must_use]
    pub fn layout(&self) -> &PagingLayout {
        self.views.layout()
    }

    /// Frame of the view at `index`.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<Rect> {
        self.views.frame(index)
    }

    // --- collection -----------------------------------------------------

    /// Number of views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns `true` if there are no views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// All views in display order.
    #[must_use]
    pub fn all(&self) -> &[V] {
        self.views.views()
    }

    /// The first view.
    #[must_use]
    pub fn first(&self) -> Option<V> {
        self.views.first()
    }

    /// The last view.
    #[must_use]
    pub fn last(&self) -> Option<V> {
        self.views.last()
    }

    /// The view at `index`.
    pub fn get(&self, index: usize) -> Result<V, PagerError> {
        self.views.get(index)
    }

    /// Index of `view`, if present.
    #[must_use]
    pub fn index_of(&self, view: V) -> Option<usize> {
        self.views.index_of(view)
    }

    /// Stores `view` at `index`.
    ///
    /// `index == len()` appends; any smaller index replaces.
    pub fn set(&mut self, index: usize, view: V) -> Result<(), PagerError> {
        self.replace(index, view).map(drop)
    }

    /// Inserts `view` at `index` (`index <= len()`).
    pub fn insert(&mut self, index: usize, view: V) -> Result<(), PagerError> {
        self.views.insert(index, view)?;
        self.did_insert(index, view);
        self.flush();
        Ok(())
    }

    /// Inserts `views` in order starting at `index`, so later views land
    /// after earlier ones.
    ///
    /// The index is checked once up front; nothing is inserted if it is out
    /// of range.
    pub fn insert_all<I>(&mut self, index: usize, views: I) -> Result<(), PagerError>
    where
        I: IntoIterator<Item = V>,
    {
        if index > self.views.len() {
            return Err(PagerError::IndexOutOfRange {
                index,
                len: self.views.len(),
            });
        }
        for (offset, view) in views.into_iter().enumerate() {
            self.views.insert(index + offset, view)?;
            self.did_insert(index + offset, view);
        }
        self.flush();
        Ok(())
    }

    /// Appends `view`.
    pub fn push(&mut self, view: V) {
        self.views.push(view);
        self.did_insert(self.views.len() - 1, view);
        self.flush();
    }

    /// Appends `views` in order.
    pub fn extend<I>(&mut self, views: I)
    where
        I: IntoIterator<Item = V>,
    {
        for view in views {
            self.views.push(view);
            self.did_insert(self.views.len() - 1, view);
        }
        self.flush();
    }

    /// Removes and returns the view at `index`.
    pub fn remove(&mut self, index: usize) -> Result<V, PagerError> {
        let view = self.views.remove(index)?;
        self.did_remove(view);
        self.flush();
        Ok(view)
    }

    /// Removes and returns the last view.
    pub fn remove_last(&mut self) -> Result<V, PagerError> {
        let view = self.views.pop()?;
        self.did_remove(view);
        self.flush();
        Ok(view)
    }

    /// Removes every view and returns them in display order.
    ///
    /// The displayed-page baseline is forgotten as well.
    pub fn remove_all(&mut self) -> Vec<V> {
        let removed = self.views.clear();
        self.gestures.clear();
        self.arbiter.clear();
        self.settle_tap_suppression();
        self.page.reset();
        #[cfg(feature = "tracing")]
        debug!(removed = removed.len(), "removed all views");
        self.notify_count();
        self.flush();
        removed
    }

    /// Puts `view` in the slot at `index` and returns the displaced view.
    ///
    /// `index == len()` appends instead and returns `None`. The new view
    /// receives the currently enabled gestures.
    pub fn replace(&mut self, index: usize, view: V) -> Result<Option<V>, PagerError> {
        if index == self.views.len() {
            self.push(view);
            return Ok(None);
        }
        let old = self.views.replace(index, view)?;
        if old != view {
            self.release(old);
        }
        self.gestures.apply(view, self.flags);
        #[cfg(feature = "tracing")]
        debug!(index, ?old, ?view, "replaced view");
        self.notify_count();
        self.flush();
        Ok(Some(old))
    }

    /// Requests a scroll to `view`; returns `false` if it is not present.
    pub fn move_to(&mut self, view: V) -> bool {
        let Some(index) = self.views.index_of(view) else {
            return false;
        };
        self.request_scroll(index);
        true
    }

    /// The pending scroll request, if any.
    #[must_use]
    pub fn scroll_request(&self) -> Option<ScrollRequest> {
        self.scroll_request
    }

    /// Takes the pending scroll request for the host to perform.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.scroll_request.take()
    }

    // --- scrolling ------------------------------------------------------

    /// The user started dragging the content at `offset_x`.
    pub fn begin_drag(&mut self, offset_x: f64) {
        self.page.begin_drag(offset_x);
    }

    /// The content offset changed; resolves and returns the displayed page.
    ///
    /// The first resolved page only establishes a baseline. Afterwards the
    /// delegate hears about every change of page.
    pub fn did_scroll(&mut self, offset_x: f64) -> Option<usize> {
        let page = self.views.layout().page_index(
            offset_x,
            self.config.page_policy(),
            self.page.drag_origin(),
        )?;
        let change = self.page.observe(page);
        #[cfg(feature = "tracing")]
        if let PageChange::Changed { from, to } = change {
            debug!(from, to, "displayed page changed");
        }
        if let PageChange::Changed { to, .. } = change {
            if let Ok(view) = self.views.get(to) {
                self.outbox
                    .push_back(Notice::DisplayedChanged { view, index: to });
            }
            self.flush();
        }
        Some(page)
    }

    /// Last resolved page, if a baseline exists.
    #[must_use]
    pub fn current_page(&self) -> Option<usize> {
        self.page.current()
    }

    // --- gestures -------------------------------------------------------

    /// Enabled gesture kinds.
    #[must_use]
    pub fn gestures(&self) -> GestureFlags {
        self.flags
    }

    /// Whether `kind` is enabled.
    #[must_use]
    pub fn gesture_enabled(&self, kind: GestureKind) -> bool {
        self.flags.has(kind)
    }

    /// Enables or disables `kind` on every current and future view.
    ///
    /// Only an actual edge does anything; setting a flag to its current value
    /// is a no-op.
    pub fn set_gesture(&mut self, kind: GestureKind, enabled: bool) {
        if self.flags.has(kind) == enabled {
            return;
        }
        self.flags.set(kind.flag(), enabled);
        #[cfg(feature = "tracing")]
        debug!(?kind, enabled, views = self.views.len(), "gesture flag changed");

        for &view in self.views.views() {
            if enabled {
                self.gestures.attach(view, kind);
            } else {
                self.gestures.detach(view, kind);
            }
        }
        if !enabled || kind == GestureKind::DoubleTap {
            self.arbiter.prune(&self.gestures);
        }
        if !enabled && kind == GestureKind::LongPress {
            self.settle_tap_suppression();
        }
    }

    /// Whether single taps are enabled.
    #[must_use]
    pub fn tap_enabled(&self) -> bool {
        self.gesture_enabled(GestureKind::Tap)
    }

    /// Enables or disables single taps.
    pub fn set_tap_enabled(&mut self, enabled: bool) {
        self.set_gesture(GestureKind::Tap, enabled);
    }

    /// Whether double taps are enabled.
    #[must_use]
    pub fn double_tap_enabled(&self) -> bool {
        self.gesture_enabled(GestureKind::DoubleTap)
    }

    /// Enables or disables double taps.
    pub fn set_double_tap_enabled(&mut self, enabled: bool) {
        self.set_gesture(GestureKind::DoubleTap, enabled);
    }

    /// Whether pans are enabled.
    #[must_use]
    pub fn pan_enabled(&self) -> bool {
        self.gesture_enabled(GestureKind::Pan)
    }

    /// Enables or disables pans.
    pub fn set_pan_enabled(&mut self, enabled: bool) {
        self.set_gesture(GestureKind::Pan, enabled);
    }

    /// Whether pinches are enabled.
    #[must_use]
    pub fn pinch_enabled(&self) -> bool {
        self.gesture_enabled(GestureKind::Pinch)
    }

    /// Enables or disables pinches.
    pub fn set_pinch_enabled(&mut self, enabled: bool) {
        self.set_gesture(GestureKind::Pinch, enabled);
    }

    /// Whether long presses are enabled.
    #[must_use]
    pub fn long_press_enabled(&self) -> bool {
        self.gesture_enabled(GestureKind::LongPress)
    }

    /// Enables or disables long presses.
    pub fn set_long_press_enabled(&mut self, enabled: bool) {
        self.set_gesture(GestureKind::LongPress, enabled);
    }

    /// Enables every gesture kind.
    pub fn add_all_gestures(&mut self) {
        for kind in GestureKind::ALL {
            self.set_gesture(kind, true);
        }
    }

    /// Disables every gesture kind.
    pub fn remove_all_gestures(&mut self) {
        for kind in GestureKind::ALL {
            self.set_gesture(kind, false);
        }
    }

    /// Attachment bookkeeping for all views.
    #[must_use]
    pub fn gesture_registry(&self) -> &GestureRegistry<V> {
        &self.gestures
    }

    /// Recognizers currently attached to `view`.
    #[must_use]
    pub fn recognizers(&self, view: V) -> &[Recognizer] {
        self.gestures.recognizers(view)
    }

    /// Feeds one recognizer update from the host.
    ///
    /// Updates from detached recognizers are ignored. Single taps that must
    /// wait for a double tap are held until it fails. While a long press is
    /// active, single taps are disabled and then restored to their previous
    /// setting when it ends or is cancelled.
    pub fn handle_gesture(&mut self, event: GestureEvent<V>) {
        let GestureEvent {
            view,
            recognizer,
            info,
        } = event;
        let fired = self
            .arbiter
            .resolve(&self.gestures, view, recognizer, info.phase, info);

        #[cfg(feature = "tracing")]
        if fired.is_empty() {
            trace!(?view, ?recognizer, phase = ?info.phase, "gesture update held or dropped");
        }

        for resolved in fired {
            if resolved.kind == GestureKind::LongPress && resolved.payload.phase == GesturePhase::Began
            {
                self.begin_tap_suppression(resolved.view, resolved.recognizer);
            }
            self.outbox.push_back(Notice::Gesture {
                kind: resolved.kind,
                view: resolved.view,
                info: resolved.payload,
            });
        }
        if matches!(info.phase, GesturePhase::Ended | GesturePhase::Cancelled) {
            self.end_tap_suppression(recognizer);
        }
        self.flush();
    }

    fn begin_tap_suppression(&mut self, view: V, long_press: RecognizerId) {
        if self.suppressing.is_some() {
            return;
        }
        self.suppressing = Some(TapSuppression {
            view,
            long_press,
            restore_tap: self.tap_enabled(),
        });
        self.set_gesture(GestureKind::Tap, false);
    }

    fn end_tap_suppression(&mut self, long_press: RecognizerId) {
        if let Some(active) = self.suppressing
            && active.long_press == long_press
        {
            self.suppressing = None;
            self.set_gesture(GestureKind::Tap, active.restore_tap);
        }
    }

    /// Ends the suppression window if its long press recognizer was detached.
    ///
    /// A detached recognizer never reports `Ended` or `Cancelled`.
    fn settle_tap_suppression(&mut self) {
        if let Some(active) = self.suppressing
            && self.gestures.find(active.view, active.long_press).is_none()
        {
            #[cfg(feature = "tracing")]
            debug!(view = ?active.view, "long press detached while suppressing taps");
            self.end_tap_suppression(active.long_press);
        }
    }

    // --- internals ------------------------------------------------------

    fn did_insert(&mut self, index: usize, view: V) {
        self.gestures.apply(view, self.flags);
        #[cfg(feature = "tracing")]
        debug!(index, ?view, kinds = ?self.gestures.kinds(view), "inserted view");
        self.notify_count();
        if self.config.move_on_add {
            self.request_scroll(index);
        }
    }

    fn did_remove(&mut self, view: V) {
        self.release(view);
        #[cfg(feature = "tracing")]
        debug!(?view, remaining = self.views.len(), "removed view");
        self.notify_count();
    }

    fn request_scroll(&mut self, index: usize) {
        self.scroll_request = Some(ScrollRequest {
            offset: self.views.layout().offset_for(index),
            animated: self.config.animated,
        });
    }

    /// Drops gesture state for a view that left the collection.
    fn release(&mut self, view: V) {
        if self.views.index_of(view).is_some() {
            return;
        }
        self.gestures.forget(view);
        self.arbiter.forget(view);
        self.settle_tap_suppression();
    }

    fn notify_count(&mut self) {
        self.outbox
            .push_back(Notice::CountChanged(self.views.len()));
    }

    /// Delivers queued notifications.
    ///
    /// Reentrant calls from inside a callback only queue; the outermost flush
    /// delivers everything in order.
    fn flush(&mut self) {
        if self.dispatching {
            return;
        }
        self.dispatching = true;
        while let Some(notice) = self.outbox.pop_front() {
            let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) else {
                self.outbox.clear();
                break;
            };
            let Ok(mut delegate) = delegate.try_borrow_mut() else {
                // The host holds its delegate borrowed; retry on the next flush.
                self.outbox.push_front(notice);
                break;
            };
            self.deliver(&mut *delegate, notice);
        }
        self.dispatching = false;
    }

    fn deliver(&mut self, delegate: &mut dyn PagerDelegate<V>, notice: Notice<V>) {
        match notice {
            Notice::CountChanged(count) => delegate.views_count_changed(self, count),
            Notice::DisplayedChanged { view, index } => {
                // The page may have moved if an earlier callback edited the views.
                let index = if self.views.get(index) == Ok(view) {
                    Some(index)
                } else {
                    self.views.index_of(view)
                };
                if let Some(index) = index {
                    delegate.displayed_view_changed(self, view, index);
                }
            }
            Notice::Gesture { kind, view, info } => {
                let Some(index) = self.views.index_of(view) else {
                    #[cfg(feature = "tracing")]
                    trace!(?kind, ?view, "dropping gesture for removed view");
                    return;
                };
                match kind {
                    GestureKind::Tap => delegate.tap(self, view, index, &info),
                    GestureKind::DoubleTap => delegate.double_tap(self, view, index, &info),
                    GestureKind::Pan => delegate.pan(self, view, index, &info),
                    GestureKind::Pinch => delegate.pinch(self, view, index, &info),
                    GestureKind::LongPress => delegate.long_press(self, view, index, &info),
                }
            }
        }
    }
}
