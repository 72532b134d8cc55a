// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pager --heading-base-level=0

//! Understory Pager: a headless, horizontally paging container.
//!
//! A pager hosts an ordered list of views, one per page. Each view is laid out
//! full-size in its own page slot, side by side, so the content extent is the
//! container width times the number of views. The crate keeps that layout, the
//! displayed page, and the per-view gesture wiring consistent across arbitrary
//! insertions and removals, and reports what happened to a host-supplied
//! [`PagerDelegate`].
//!
//! The pieces:
//!
//! - [`PagingLayout`]: page slots and the page index for a scroll offset,
//!   with [`PagePolicy::Rounded`] and [`PagePolicy::Retained`] resolution.
//! - [`ViewCollection`]: views paired one to one with slots, with index-based
//!   insert, remove and replace that shift later slots.
//! - [`PageTracker`]: the last displayed page plus the current drag origin.
//! - [`Pager`]: the controller tying these together with an
//!   [`understory_gesture::GestureRegistry`], per-instance gesture flags, and
//!   delegate notification.
//!
//! Host frameworks are responsible for:
//!
//! - Mirroring slot frames and the content size onto a real scroll surface.
//! - Forwarding drag starts and scroll offsets
//!   ([`Pager::begin_drag`], [`Pager::did_scroll`]).
//! - Creating platform recognizers for the ids in [`Pager::recognizers`] and
//!   forwarding their updates via [`Pager::handle_gesture`].
//! - Performing the scrolls in [`Pager::take_scroll_request`].
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Size;
//! use understory_pager::{Pager, PagerDelegate};
//!
//! #[derive(Default)]
//! struct Host {
//!     counts: Vec<usize>,
//!     pages: Vec<(char, usize)>,
//! }
//!
//! impl PagerDelegate<char> for Host {
//!     fn views_count_changed(&mut self, _: &mut Pager<char>, count: usize) {
//!         self.counts.push(count);
//!     }
//!     fn displayed_view_changed(&mut self, _: &mut Pager<char>, view: char, index: usize) {
//!         self.pages.push((view, index));
//!     }
//! }
//!
//! let host = Rc::new(RefCell::new(Host::default()));
//! let mut pager = Pager::new(Size::new(100.0, 80.0));
//! pager.set_delegate(&host);
//!
//! pager.push('a');
//! pager.push('b');
//! pager.insert(1, 'c').unwrap();
//! assert_eq!(pager.all(), &['a', 'c', 'b']);
//! assert_eq!(host.borrow().counts, [1, 2, 3]);
//!
//! // The first resolved page is only a baseline.
//! assert_eq!(pager.did_scroll(0.0), Some(0));
//! assert_eq!(pager.did_scroll(150.0), Some(2));
//! assert_eq!(host.borrow().pages, [('b', 2)]);
//! ```
//!
//! With the `tracing` feature enabled, mutations, gesture flag changes and
//! dropped gesture updates are logged at `debug`/`trace` level.

mod collection;
mod config;
mod delegate;
mod error;
mod layout;
mod page;
mod pager;

pub use collection::ViewCollection;
pub use config::PagerConfig;
pub use delegate::{PagerDelegate, ViewKey};
pub use error::PagerError;
pub use layout::{PagePolicy, PagingLayout};
pub use page::{PageChange, PageTracker};
pub use pager::{Pager, ScrollRequest};

pub use understory_gesture::{
    GestureEvent, GestureFlags, GestureInfo, GestureKind, GesturePhase, Recognizer, RecognizerId,
};
