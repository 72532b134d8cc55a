// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture kinds, flag sets, phases, and the per-event payload.

use kurbo::{Point, Vec2};

/// The kinds of gesture recognizer that can be attached to a view.
///
/// [`GestureKind::DoubleTap`] is a logical sub-kind of tap: a view may hold a
/// single-tap and a double-tap recognizer at the same time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Single tap.
    Tap,
    /// Double tap.
    DoubleTap,
    /// Pan (drag) with one or two touches.
    Pan,
    /// Two-finger pinch.
    Pinch,
    /// Press and hold.
    LongPress,
}

impl GestureKind {
    /// Every kind, in the order recognizers are attached to a fresh view.
    ///
    /// Double tap comes last so that a single tap attached first can be wired
    /// to wait for it.
    pub const ALL: [Self; 5] = [
        Self::Tap,
        Self::Pan,
        Self::Pinch,
        Self::LongPress,
        Self::DoubleTap,
    ];

    /// Returns the flag corresponding to this kind.
    #[must_use]
    pub const fn flag(self) -> GestureFlags {
        match self {
            Self::Tap => GestureFlags::TAP,
            Self::DoubleTap => GestureFlags::DOUBLE_TAP,
            Self::Pan => GestureFlags::PAN,
            Self::Pinch => GestureFlags::PINCH,
            Self::LongPress => GestureFlags::LONG_PRESS,
        }
    }

    /// Returns `true` for the two tap kinds.
    #[must_use]
    pub const fn is_tap(self) -> bool {
        matches!(self, Self::Tap | Self::DoubleTap)
    }

    /// Returns `true` if recognizers of this kind only report a single,
    /// terminal recognition (`Ended`) or a failure.
    #[must_use]
    pub const fn is_discrete(self) -> bool {
        self.is_tap()
    }
}

bitflags::bitflags! {
    /// A set of gesture kinds, used for the per-instance toggle flags.
    ///
    /// All flags default to off.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GestureFlags: u8 {
        /// Single tap.
        const TAP        = 0b0000_0001;
        /// Double tap.
        const DOUBLE_TAP = 0b0000_0010;
        /// Pan.
        const PAN        = 0b0000_0100;
        /// Pinch.
        const PINCH      = 0b0000_1000;
        /// Long press.
        const LONG_PRESS = 0b0001_0000;
    }
}

impl GestureFlags {
    /// Returns `true` if `kind` is set.
    #[must_use]
    pub const fn has(self, kind: GestureKind) -> bool {
        self.contains(kind.flag())
    }

    /// Iterates over the kinds set in `self`, in [`GestureKind::ALL`] order.
    pub fn kinds(self) -> impl Iterator<Item = GestureKind> {
        GestureKind::ALL.into_iter().filter(move |k| self.has(*k))
    }
}

impl From<GestureKind> for GestureFlags {
    fn from(kind: GestureKind) -> Self {
        kind.flag()
    }
}

/// Lifecycle phase reported by a recognizer.
///
/// Continuous recognizers (pan, pinch, long press) move through
/// `Began → Changed* → Ended | Cancelled`. Discrete recognizers (the tap
/// kinds) report `Ended` once recognized, or `Failed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// Not yet recognized.
    #[default]
    Possible,
    /// A continuous gesture started.
    Began,
    /// A continuous gesture moved.
    Changed,
    /// Recognized (discrete) or finished (continuous).
    Ended,
    /// Interrupted by the platform's input lifecycle.
    Cancelled,
    /// The recognizer gave up.
    Failed,
}

impl GesturePhase {
    /// Returns `true` for `Ended`, `Cancelled`, and `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }
}

/// Payload describing one recognizer update.
///
/// Hosts fill in whichever fields their platform reports; the rest keep their
/// neutral defaults (`scale == 1.0`, zero vectors).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureInfo {
    /// Phase of the recognizer for this update.
    pub phase: GesturePhase,
    /// Location of the interaction in the view's coordinate space.
    pub location: Point,
    /// Cumulative pan translation since `Began`.
    pub translation: Vec2,
    /// Pan velocity in points per second.
    pub velocity: Vec2,
    /// Pinch scale relative to the start of the gesture.
    pub scale: f64,
    /// Number of touches involved.
    pub touches: u8,
}

impl GestureInfo {
    /// Creates a payload for `phase` with neutral values elsewhere.
    #[must_use]
    pub fn new(phase: GesturePhase) -> Self {
        Self {
            phase,
            ..Self::default()
        }
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: Point) -> Self {
        self.location = location;
        self
    }

    /// Sets the pan translation.
    #[must_use]
    pub fn with_translation(mut self, translation: Vec2) -> Self {
        self.translation = translation;
        self
    }

    /// Sets the pinch scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for GestureInfo {
    fn default() -> Self {
        Self {
            phase: GesturePhase::Possible,
            location: Point::ZERO,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
            scale: 1.0,
            touches: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn flags_default_to_empty() {
        let flags = GestureFlags::default();
        assert!(flags.is_empty());
        assert!(GestureKind::ALL.iter().all(|k| !flags.has(*k)));
    }

    #[test]
    fn kinds_iterates_in_attach_order() {
        let flags = GestureFlags::all();
        let kinds: Vec<_> = flags.kinds().collect();
        assert_eq!(kinds, GestureKind::ALL.to_vec());

        let flags = GestureFlags::DOUBLE_TAP | GestureFlags::TAP;
        let kinds: Vec<_> = flags.kinds().collect();
        assert_eq!(kinds, [GestureKind::Tap, GestureKind::DoubleTap]);
    }

    #[test]
    fn info_defaults_are_neutral() {
        let info = GestureInfo::new(GesturePhase::Changed).with_scale(2.5);
        assert_eq!(info.phase, GesturePhase::Changed);
        assert_eq!(info.translation, Vec2::ZERO);
        assert_eq!(info.scale, 2.5);
        assert_eq!(GestureInfo::default().scale, 1.0);
    }

    #[test]
    fn terminal_phases() {
        assert!(GesturePhase::Ended.is_terminal());
        assert!(GesturePhase::Failed.is_terminal());
        assert!(!GesturePhase::Changed.is_terminal());
    }
}
