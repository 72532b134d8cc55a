// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime resolution of the tap/double-tap must-fail-before relation.
//!
//! [`GestureRegistry`] records *which* recognizer must fail before another may
//! fire; [`TapArbiter`] applies that relation to a stream of recognizer
//! updates:
//!
//! - A single tap that recognizes while it waits on a live double tap is held.
//! - If the double tap then recognizes, the held tap is dropped and only the
//!   double tap fires, so a rapid double interaction is never reported as two
//!   singles.
//! - If the double tap fails (or is cancelled), the held tap is released.
//! - Non-tap kinds pass straight through on every phase.
//!
//! ## Minimal example
//!
//! ```
//! use understory_gesture::{
//!     GestureKind, GesturePhase, GestureRegistry, TapArbiter,
//! };
//!
//! let mut registry = GestureRegistry::<u32>::new();
//! let tap = registry.attach(1, GestureKind::Tap).unwrap();
//! let double = registry.attach(1, GestureKind::DoubleTap).unwrap();
//! let mut arbiter = TapArbiter::new();
//!
//! // The single tap recognizes first but has to wait.
//! let fired = arbiter.resolve(&registry, 1, tap, GesturePhase::Ended, "first");
//! assert!(fired.is_empty());
//!
//! // The double tap fails: the held single tap is released.
//! let fired = arbiter.resolve(&registry, 1, double, GesturePhase::Failed, "second");
//! assert_eq!(fired.len(), 1);
//! assert_eq!(fired[0].kind, GestureKind::Tap);
//! assert_eq!(fired[0].payload, "first");
//! ```

use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::kind::{GestureKind, GesturePhase};
use crate::recognizer::RecognizerId;
use crate::registry::GestureRegistry;

/// A recognizer update that should be reported to the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolved<V, T> {
    /// View the recognizer belongs to.
    pub view: V,
    /// Recognizer that fired.
    pub recognizer: RecognizerId,
    /// Kind of the recognizer.
    pub kind: GestureKind,
    /// Payload supplied with the update that caused the firing.
    pub payload: T,
}

#[derive(Clone, Debug)]
struct Held<V, T> {
    view: V,
    recognizer: RecognizerId,
    payload: T,
}

/// Output of [`TapArbiter::resolve`]; at most two entries.
pub type Resolution<V, T> = SmallVec<[Resolved<V, T>; 2]>;

/// Holds single taps until the double tap they depend on has failed.
#[derive(Clone, Debug)]
pub struct TapArbiter<V, T> {
    /// Keyed by the blocking (double tap) recognizer.
    held: HashMap<RecognizerId, Held<V, T>>,
}

impl<V, T> Default for TapArbiter<V, T> {
    fn default() -> Self {
        Self {
            held: HashMap::new(),
        }
    }
}

impl<V, T> TapArbiter<V, T>
where
    V: Copy + Eq + Hash,
{
    /// Creates an arbiter with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of single taps currently waiting on a double tap.
    #[must_use]
    pub fn held(&self) -> usize {
        self.held.len()
    }

    /// Feeds one recognizer update through the must-fail-before relation.
    ///
    /// Updates from recognizers that are not attached to `view` in `registry`
    /// (stale ids) resolve to nothing.
    pub fn resolve(
        &mut self,
        registry: &GestureRegistry<V>,
        view: V,
        recognizer: RecognizerId,
        phase: GesturePhase,
        payload: T,
    ) -> Resolution<V, T> {
        let mut out = Resolution::new();
        let Some(kind) = registry.find(view, recognizer).map(|r| r.kind()) else {
            return out;
        };
        let fire = |payload| Resolved {
            view,
            recognizer,
            kind,
            payload,
        };

        match (kind, phase) {
            (GestureKind::Tap, GesturePhase::Ended) => {
                match registry.required_failure(view, GestureKind::Tap) {
                    Some(blocker) if registry.find(view, blocker).is_some() => {
                        self.held.insert(
                            blocker,
                            Held {
                                view,
                                recognizer,
                                payload,
                            },
                        );
                    }
                    _ => out.push(fire(payload)),
                }
            }
            (GestureKind::DoubleTap, GesturePhase::Ended) => {
                self.held.remove(&recognizer);
                out.push(fire(payload));
            }
            (GestureKind::DoubleTap, GesturePhase::Failed | GesturePhase::Cancelled) => {
                if let Some(held) = self.held.remove(&recognizer)
                    && registry.find(held.view, held.recognizer).is_some()
                {
                    out.push(Resolved {
                        view: held.view,
                        recognizer: held.recognizer,
                        kind: GestureKind::Tap,
                        payload: held.payload,
                    });
                }
            }
            (GestureKind::Tap | GestureKind::DoubleTap, _) => {}
            (GestureKind::Pan | GestureKind::Pinch | GestureKind::LongPress, _) => {
                out.push(fire(payload));
            }
        }
        out
    }

    /// Drops held taps whose blocking recognizer is no longer attached.
    ///
    /// Call after detaching recognizers; a tap waiting on a recognizer that
    /// can no longer fail would otherwise be held forever.
    pub fn prune(&mut self, registry: &GestureRegistry<V>) -> usize {
        let before = self.held.len();
        self.held.retain(|blocker, held| {
            registry.find(held.view, *blocker).is_some()
                && registry.find(held.view, held.recognizer).is_some()
        });
        before - self.held.len()
    }

    /// Drops everything held for `view`.
    pub fn forget(&mut self, view: V) {
        self.held.retain(|_, held| held.view != view);
    }

    /// Drops everything held.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::GestureFlags;

    fn setup() -> (GestureRegistry<u32>, RecognizerId, RecognizerId) {
        let mut reg = GestureRegistry::new();
        reg.apply(1, GestureFlags::TAP | GestureFlags::DOUBLE_TAP);
        let tap = reg.recognizer(1, GestureKind::Tap).unwrap().id();
        let double = reg.recognizer(1, GestureKind::DoubleTap).unwrap().id();
        (reg, tap, double)
    }

    #[test]
    fn lone_tap_fires_immediately() {
        let mut reg = GestureRegistry::<u32>::new();
        let tap = reg.attach(1, GestureKind::Tap).unwrap();
        let mut arb = TapArbiter::new();
        let out = arb.resolve(&reg, 1, tap, GesturePhase::Ended, ());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, GestureKind::Tap);
        assert_eq!(arb.held(), 0);
    }

    #[test]
    fn double_tap_recognition_swallows_held_tap() {
        let (reg, tap, double) = setup();
        let mut arb = TapArbiter::new();

        assert!(arb.resolve(&reg, 1, tap, GesturePhase::Ended, 1).is_empty());
        assert_eq!(arb.held(), 1);

        let out = arb.resolve(&reg, 1, double, GesturePhase::Ended, 2);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, GestureKind::DoubleTap);
        assert_eq!(out[0].payload, 2);
        assert_eq!(arb.held(), 0);
    }

    #[test]
    fn failed_tap_fires_nothing() {
        let (reg, tap, _) = setup();
        let mut arb = TapArbiter::new();
        assert!(arb.resolve(&reg, 1, tap, GesturePhase::Failed, ()).is_empty());
        assert_eq!(arb.held(), 0);
    }

    #[test]
    fn stale_recognizer_is_ignored() {
        let (mut reg, tap, _) = setup();
        reg.detach(1, GestureKind::Tap);
        let mut arb = TapArbiter::new();
        assert!(arb.resolve(&reg, 1, tap, GesturePhase::Ended, ()).is_empty());
        assert!(arb.resolve(&reg, 2, tap, GesturePhase::Ended, ()).is_empty());
    }

    #[test]
    fn continuous_kinds_pass_through_every_phase() {
        let mut reg = GestureRegistry::<u32>::new();
        let pan = reg.attach(1, GestureKind::Pan).unwrap();
        let mut arb = TapArbiter::new();
        for phase in [
            GesturePhase::Began,
            GesturePhase::Changed,
            GesturePhase::Ended,
        ] {
            let out = arb.resolve(&reg, 1, pan, phase, phase);
            assert_eq!(out.len(), 1);
            assert_eq!(out[0].payload, phase);
        }
    }

    #[test]
    fn prune_drops_taps_waiting_on_detached_double_tap() {
        let (mut reg, tap, _) = setup();
        let mut arb = TapArbiter::new();
        arb.resolve(&reg, 1, tap, GesturePhase::Ended, ());
        assert_eq!(arb.held(), 1);

        reg.detach(1, GestureKind::DoubleTap);
        assert_eq!(arb.prune(&reg), 1);
        assert_eq!(arb.held(), 0);
    }
}
