// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior switches for a [`Pager`](crate::Pager).

use crate::layout::PagePolicy;

/// Behavior switches for a [`Pager`](crate::Pager).
///
/// All three default to `true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagerConfig {
    /// Whether scroll requests ask the host to animate.
    pub animated: bool,
    /// Resolve the displayed page by rounding ([`PagePolicy::Rounded`]);
    /// when `false`, use [`PagePolicy::Retained`].
    pub round_page_on_display: bool,
    /// Request a scroll to every newly inserted view.
    pub move_on_add: bool,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            animated: true,
            round_page_on_display: true,
            move_on_add: true,
        }
    }
}

impl PagerConfig {
    /// Sets [`animated`](Self::animated).
    #[must_use]
    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Sets [`round_page_on_display`](Self::round_page_on_display).
    #[must_use]
    pub fn with_round_page_on_display(mut self, round: bool) -> Self {
        self.round_page_on_display = round;
        self
    }

    /// Sets [`move_on_add`](Self::move_on_add).
    #[must_use]
    pub fn with_move_on_add(mut self, move_on_add: bool) -> Self {
        self.move_on_add = move_on_add;
        self
    }

    /// The page policy selected by [`round_page_on_display`](Self::round_page_on_display).
    #[must_use]
    pub fn page_policy(&self) -> PagePolicy {
        if self.round_page_on_display {
            PagePolicy::Rounded
        } else {
            PagePolicy::Retained
        }
    }
}
