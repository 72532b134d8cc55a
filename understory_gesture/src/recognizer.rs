// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizer handles and descriptors.

use core::ops::RangeInclusive;

use crate::kind::{GestureInfo, GestureKind};

/// Identifier for one attached recognizer.
///
/// Ids are allocated monotonically by a [`GestureRegistry`](crate::GestureRegistry)
/// and never reused, so a recognizer that is detached and attached again (for
/// example when a single tap is rebuilt) gets a fresh id. Events carrying a
/// stale id are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecognizerId(pub(crate) u64);

impl RecognizerId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Descriptor of an attached recognizer.
///
/// The configuration is fixed per kind: taps require one touch and one or two
/// taps, pans accept one or two touches, and the continuous kinds recognize
/// simultaneously with everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recognizer {
    id: RecognizerId,
    kind: GestureKind,
}

impl Recognizer {
    pub(crate) const fn new(id: RecognizerId, kind: GestureKind) -> Self {
        Self { id, kind }
    }

    /// The recognizer's id.
    #[must_use]
    pub const fn id(&self) -> RecognizerId {
        self.id
    }

    /// The recognizer's kind.
    #[must_use]
    pub const fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Number of taps required to recognize; `0` for non-tap kinds.
    #[must_use]
    pub const fn taps_required(&self) -> u8 {
        match self.kind {
            GestureKind::Tap => 1,
            GestureKind::DoubleTap => 2,
            _ => 0,
        }
    }

    /// Accepted number of simultaneous touches.
    #[must_use]
    pub const fn touches(&self) -> RangeInclusive<u8> {
        match self.kind {
            GestureKind::Pan => 1..=2,
            GestureKind::Pinch => 2..=2,
            _ => 1..=1,
        }
    }

    /// Whether this recognizer may recognize alongside other recognizers
    /// (including the container's own scrolling).
    #[must_use]
    pub const fn recognizes_simultaneously(&self) -> bool {
        matches!(
            self.kind,
            GestureKind::Pan | GestureKind::Pinch | GestureKind::LongPress
        )
    }
}

/// One recognizer update fed in by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEvent<V> {
    /// The view the recognizer is attached to.
    pub view: V,
    /// The recognizer reporting the update.
    pub recognizer: RecognizerId,
    /// Phase and measurements.
    pub info: GestureInfo,
}

impl<V> GestureEvent<V> {
    /// Creates an event.
    pub const fn new(view: V, recognizer: RecognizerId, info: GestureInfo) -> Self {
        Self {
            view,
            recognizer,
            info,
        }
    }
}
