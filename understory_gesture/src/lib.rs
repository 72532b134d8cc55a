// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: per-view gesture recognizer bookkeeping.
//!
//! This crate models the gesture recognizers a container attaches to the views
//! it hosts, without owning any platform recognizer objects. It provides:
//!
//! - [`GestureKind`] / [`GestureFlags`]: the five recognizer kinds (tap,
//!   double tap, pan, pinch, long press) and a bit set over them.
//! - [`GestureRegistry`]: which recognizers are attached to which view, with
//!   idempotent attach/detach and an explicit "must fail before" table wiring
//!   a single tap to wait for a double tap on the same view.
//! - [`TapArbiter`]: applies that table to recognizer updates so a rapid
//!   double interaction is reported once as a double tap, never as two singles.
//! - [`GestureEvent`] / [`GestureInfo`] / [`GesturePhase`]: the shape of the
//!   updates a host feeds in from its platform's input lifecycle.
//!
//! Host frameworks are responsible for:
//!
//! - Creating a platform recognizer for every [`RecognizerId`] the registry
//!   hands out and destroying it when the id is detached.
//! - Forwarding each recognizer's phase changes as [`GestureEvent`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_gesture::{GestureFlags, GestureKind, GestureRegistry};
//!
//! let mut registry = GestureRegistry::<u32>::new();
//!
//! // Attach everything the current flags ask for to view 3.
//! let flags = GestureFlags::TAP | GestureFlags::PAN;
//! assert_eq!(registry.apply(3, flags), 2);
//! assert_eq!(registry.kinds(3), flags);
//!
//! // Turning pan off for the view detaches only the pan recognizer.
//! registry.detach(3, GestureKind::Pan);
//! assert_eq!(registry.kinds(3), GestureFlags::TAP);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arbiter;
mod kind;
mod recognizer;
mod registry;

pub use arbiter::{Resolution, Resolved, TapArbiter};
pub use kind::{GestureFlags, GestureInfo, GestureKind, GesturePhase};
pub use recognizer::{GestureEvent, Recognizer, RecognizerId};
pub use registry::GestureRegistry;
