// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-view recognizer attachments and the must-fail-before table.

use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::kind::{GestureFlags, GestureKind};
use crate::recognizer::{Recognizer, RecognizerId};

/// Inline capacity for a view's recognizer list: one per kind.
const INLINE_RECOGNIZERS: usize = 5;

type RecognizerList = SmallVec<[Recognizer; INLINE_RECOGNIZERS]>;

/// Bookkeeping of which recognizers are attached to which views.
///
/// `GestureRegistry` owns no platform objects; it records, per view key `V`,
/// at most one recognizer of each [`GestureKind`], plus a directed
/// "must fail before" relation between recognizers on the same view.
///
/// ## Tap and double tap
///
/// - Attaching is idempotent per `(view, kind)`.
/// - Whenever a view holds both a single tap and a double tap, the single tap
///   must wait for the double tap to fail. The edge is (re)established whenever
///   either recognizer is created.
/// - Detaching [`GestureKind::Tap`] never touches the double tap.
/// - Detaching [`GestureKind::DoubleTap`] removes only the double tap, then
///   rebuilds an existing single tap (fresh [`RecognizerId`], no dependency).
///
/// ## Example
///
/// ```rust
/// use understory_gesture::{GestureKind, GestureRegistry};
///
/// let mut registry = GestureRegistry::<u32>::new();
/// let tap = registry.attach(7, GestureKind::Tap).unwrap();
/// let double = registry.attach(7, GestureKind::DoubleTap).unwrap();
///
/// // The single tap waits for the double tap to fail.
/// assert_eq!(registry.required_failure(7, GestureKind::Tap), Some(double));
///
/// // Attaching again is a no-op.
/// assert_eq!(registry.attach(7, GestureKind::Tap), None);
///
/// // Dropping the double tap rebuilds the single tap without the dependency.
/// assert!(registry.detach(7, GestureKind::DoubleTap));
/// let rebuilt = registry.recognizer(7, GestureKind::Tap).unwrap().id();
/// assert_ne!(rebuilt, tap);
/// assert_eq!(registry.required_failure(7, GestureKind::Tap), None);
/// ```
#[derive(Clone, Debug)]
pub struct GestureRegistry<V>
where
    V: Copy + Eq + Hash,
{
    attached: HashMap<V, RecognizerList>,
    /// `(view, waiting kind)` -> recognizer that must fail first.
    must_fail: HashMap<(V, GestureKind), RecognizerId>,
    next_id: u64,
}

impl<V> Default for GestureRegistry<V>
where
    V: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> GestureRegistry<V>
where
    V: Copy + Eq + Hash,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attached: HashMap::new(),
            must_fail: HashMap::new(),
            next_id: 1,
        }
    }

    /// Returns `true` if no view holds any recognizer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Total number of attached recognizers across all views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attached.values().map(|list| list.len()).sum()
    }

    /// Iterates over views that hold at least one recognizer.
    pub fn views(&self) -> impl Iterator<Item = V> + '_ {
        self.attached.keys().copied()
    }

    /// Returns `true` if `view` holds a recognizer of `kind`.
    #[must_use]
    pub fn contains(&self, view: V, kind: GestureKind) -> bool {
        self.recognizer(view, kind).is_some()
    }

    /// Returns the recognizer of `kind` attached to `view`, if any.
    #[must_use]
    pub fn recognizer(&self, view: V, kind: GestureKind) -> Option<&Recognizer> {
        self.recognizers(view).iter().find(|r| r.kind() == kind)
    }

    /// Returns every recognizer attached to `view`, in attach order.
    #[must_use]
    pub fn recognizers(&self, view: V) -> &[Recognizer] {
        self.attached
            .get(&view)
            .map(|list| list.as_slice())
            .unwrap_or_default()
    }

    /// Returns the set of kinds attached to `view`.
    #[must_use]
    pub fn kinds(&self, view: V) -> GestureFlags {
        self.recognizers(view)
            .iter()
            .fold(GestureFlags::empty(), |acc, r| acc | r.kind().flag())
    }

    /// Looks up the recognizer `id` on `view`.
    ///
    /// Returns `None` for ids that were detached or belong to another view.
    #[must_use]
    pub fn find(&self, view: V, id: RecognizerId) -> Option<&Recognizer> {
        self.recognizers(view).iter().find(|r| r.id() == id)
    }

    /// Returns the recognizer that must fail before the `kind` recognizer on
    /// `view` may fire.
    #[must_use]
    pub fn required_failure(&self, view: V, kind: GestureKind) -> Option<RecognizerId> {
        self.must_fail.get(&(view, kind)).copied()
    }

    /// Attaches a recognizer of `kind` to `view`.
    ///
    /// Returns the new recognizer's id, or `None` if one of that kind was
    /// already attached (nothing changes in that case).
    pub fn attach(&mut self, view: V, kind: GestureKind) -> Option<RecognizerId> {
        if self.contains(view, kind) {
            return None;
        }

        let id = RecognizerId(self.next_id);
        self.next_id += 1;
        self.attached
            .entry(view)
            .or_default()
            .push(Recognizer::new(id, kind));

        match kind {
            GestureKind::Tap => {
                let double = self
                    .recognizer(view, GestureKind::DoubleTap)
                    .map(Recognizer::id);
                if let Some(double) = double {
                    self.must_fail.insert((view, GestureKind::Tap), double);
                }
            }
            GestureKind::DoubleTap => {
                if self.contains(view, GestureKind::Tap) {
                    self.must_fail.insert((view, GestureKind::Tap), id);
                }
            }
            GestureKind::Pan | GestureKind::Pinch | GestureKind::LongPress => {}
        }

        Some(id)
    }

    /// Detaches the recognizer of `kind` from `view`.
    ///
    /// Returns `true` if a recognizer was removed.
    pub fn detach(&mut self, view: V, kind: GestureKind) -> bool {
        if kind != GestureKind::DoubleTap {
            return self.remove(view, kind).is_some();
        }

        if self.remove(view, GestureKind::DoubleTap).is_none() {
            return false;
        }
        // Rebuild the single tap so its dependency wiring matches the new set.
        if self.remove(view, GestureKind::Tap).is_some() {
            self.attach(view, GestureKind::Tap);
        }
        true
    }

    /// Attaches every kind in `flags` to `view`.
    ///
    /// Kinds are attached in [`GestureKind::ALL`] order. Returns how many
    /// recognizers were newly created.
    pub fn apply(&mut self, view: V, flags: GestureFlags) -> usize {
        flags
            .kinds()
            .filter(|kind| self.attach(view, *kind).is_some())
            .count()
    }

    /// Drops every recognizer and dependency recorded for `view`.
    ///
    /// Returns the number of recognizers removed.
    pub fn forget(&mut self, view: V) -> usize {
        let removed = self.attached.remove(&view).map_or(0, |list| list.len());
        if removed > 0 {
            self.must_fail.retain(|(v, _), _| *v != view);
        }
        removed
    }

    /// Removes every recognizer from every view.
    pub fn clear(&mut self) {
        self.attached.clear();
        self.must_fail.clear();
    }

    fn remove(&mut self, view: V, kind: GestureKind) -> Option<Recognizer> {
        let list = self.attached.get_mut(&view)?;
        let pos = list.iter().position(|r| r.kind() == kind)?;
        let removed = list.remove(pos);
        if list.is_empty() {
            self.attached.remove(&view);
        }

        self.must_fail.remove(&(view, kind));
        self.must_fail
            .retain(|(v, _), blocker| !(*v == view && *blocker == removed.id()));
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_is_idempotent() {
        let mut reg = GestureRegistry::<u32>::new();
        assert!(reg.attach(1, GestureKind::Pan).is_some());
        assert!(reg.attach(1, GestureKind::Pan).is_none());
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.recognizers(1).len(), 1);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut reg = GestureRegistry::<u32>::new();
        let a = reg.attach(1, GestureKind::Pinch).unwrap();
        assert!(reg.detach(1, GestureKind::Pinch));
        let b = reg.attach(1, GestureKind::Pinch).unwrap();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn double_tap_attached_after_tap_wires_dependency() {
        let mut reg = GestureRegistry::<u32>::new();
        reg.attach(1, GestureKind::Tap);
        let double = reg.attach(1, GestureKind::DoubleTap).unwrap();
        assert_eq!(reg.required_failure(1, GestureKind::Tap), Some(double));
    }

    #[test]
    fn tap_attached_after_double_tap_wires_dependency() {
        let mut reg = GestureRegistry::<u32>::new();
        let double = reg.attach(1, GestureKind::DoubleTap).unwrap();
        reg.attach(1, GestureKind::Tap);
        assert_eq!(reg.required_failure(1, GestureKind::Tap), Some(double));
        assert_eq!(reg.required_failure(1, GestureKind::DoubleTap), None);
    }

    #[test]
    fn detaching_tap_leaves_double_tap() {
        let mut reg = GestureRegistry::<u32>::new();
        reg.attach(1, GestureKind::Tap);
        let double = reg.attach(1, GestureKind::DoubleTap).unwrap();

        assert!(reg.detach(1, GestureKind::Tap));
        assert!(!reg.contains(1, GestureKind::Tap));
        assert_eq!(
            reg.recognizer(1, GestureKind::DoubleTap).map(Recognizer::id),
            Some(double)
        );
        assert_eq!(reg.required_failure(1, GestureKind::Tap), None);
    }

    #[test]
    fn detaching_double_tap_without_tap_does_not_add_tap() {
        let mut reg = GestureRegistry::<u32>::new();
        reg.attach(1, GestureKind::DoubleTap);
        assert!(reg.detach(1, GestureKind::DoubleTap));
        assert!(reg.is_empty());
    }

    #[test]
    fn detach_missing_is_false() {
        let mut reg = GestureRegistry::<u32>::new();
        assert!(!reg.detach(1, GestureKind::Tap));
        assert!(!reg.detach(1, GestureKind::DoubleTap));
    }

    #[test]
    fn apply_and_forget() {
        let mut reg = GestureRegistry::<u32>::new();
        assert_eq!(reg.apply(1, GestureFlags::all()), 5);
        assert_eq!(reg.apply(1, GestureFlags::all()), 0);
        assert_eq!(reg.apply(2, GestureFlags::TAP | GestureFlags::DOUBLE_TAP), 2);
        assert_eq!(reg.kinds(1), GestureFlags::all());

        assert_eq!(reg.forget(1), 5);
        assert_eq!(reg.required_failure(1, GestureKind::Tap), None);
        assert!(reg.required_failure(2, GestureKind::Tap).is_some());
        assert_eq!(reg.views().count(), 1);
    }

    #[test]
    fn recognizer_configuration_per_kind() {
        let mut reg = GestureRegistry::<u32>::new();
        reg.apply(1, GestureFlags::all());
        let pan = reg.recognizer(1, GestureKind::Pan).unwrap();
        assert_eq!(pan.touches(), 1..=2);
        assert!(pan.recognizes_simultaneously());
        let double = reg.recognizer(1, GestureKind::DoubleTap).unwrap();
        assert_eq!(double.taps_required(), 2);
        assert!(!double.recognizes_simultaneously());
    }
}
