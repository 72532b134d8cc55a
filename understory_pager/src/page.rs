// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Displayed-page tracking across scroll updates.

/// Outcome of feeding a computed page into a [`PageTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageChange {
    /// First page ever observed; nothing to report.
    Baseline(usize),
    /// Same page as last time.
    Unchanged,
    /// The displayed page moved.
    Changed {
        /// Previously displayed page.
        from: usize,
        /// Newly displayed page.
        to: usize,
    },
}

/// Remembers the last displayed page and where the current drag started.
///
/// The first computed page only establishes a baseline, so the initial layout
/// pass never produces a spurious change.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageTracker {
    current: Option<usize>,
    drag_origin: Option<f64>,
}

impl PageTracker {
    /// Creates a tracker with no baseline and no drag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: None,
            drag_origin: None,
        }
    }

    /// Last observed page, if a baseline exists.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Offset at which the most recent drag began.
    #[must_use]
    pub fn drag_origin(&self) -> Option<f64> {
        self.drag_origin
    }

    /// Records the start of a drag at `offset_x`.
    ///
    /// The origin is kept until the next drag begins; momentum scrolling after
    /// release still resolves against it.
    pub fn begin_drag(&mut self, offset_x: f64) {
        self.drag_origin = Some(offset_x);
    }

    /// Feeds a freshly computed page.
    pub fn observe(&mut self, page: usize) -> PageChange {
        match self.current.replace(page) {
            None => PageChange::Baseline(page),
            Some(from) if from == page => PageChange::Unchanged,
            Some(from) => PageChange::Changed { from, to: page },
        }
    }

    /// Forgets the baseline and the drag origin.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
