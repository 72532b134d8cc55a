// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered view collection and its page slots.

use kurbo::{Rect, Size};

use crate::error::PagerError;
use crate::layout::PagingLayout;

/// Ordered, index-addressable views, each paired with a page slot.
///
/// Insertion order is display order. Every mutation keeps
/// `len() == layout().len()` and bumps a [`revision`](Self::revision)
/// counter, so observers can cheaply tell whether anything changed.
///
/// Views are opaque handles compared by equality (identity for handle types).
/// Removal hands the view back to the caller.
///
/// ```rust
/// use kurbo::Size;
/// use understory_pager::ViewCollection;
///
/// let mut views = ViewCollection::new(Size::new(100.0, 40.0));
/// views.insert(0, 'a').unwrap();
/// views.insert(1, 'b').unwrap();
/// views.insert(1, 'c').unwrap();
/// assert_eq!(views.views(), &['a', 'c', 'b']);
/// assert_eq!(views.frame(2).unwrap().x0, 200.0);
/// ```
#[derive(Clone, Debug)]
pub struct ViewCollection<V> {
    views: Vec<V>,
    layout: PagingLayout,
    revision: u64,
}

impl<V> ViewCollection<V>
where
    V: Copy + PartialEq,
{
    /// Creates an empty collection for a container of the given size.
    #[must_use]
    pub fn new(container: Size) -> Self {
        Self {
            views: Vec::new(),
            layout: PagingLayout::new(container),
            revision: 0,
        }
    }

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
    pub fn views(&self) -> &[V] {
        &self.views
    }

    /// The page slots.
    #[must_use]
    pub fn layout(&self) -> &PagingLayout {
        &self.layout
    }

    /// Mutation counter; bumped once per successful mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The view at `index`.
    pub fn get(&self, index: usize) -> Result<V, PagerError> {
        self.views
            .get(index)
            .copied()
            .ok_or(PagerError::out_of_range(index, self.views.len()))
    }

    /// The first view, if any.
    #[must_use]
    pub fn first(&self) -> Option<V> {
        self.views.first().copied()
    }

    /// The last view, if any.
    #[must_use]
    pub fn last(&self) -> Option<V> {
        self.views.last().copied()
    }

    /// Index of the first occurrence of `view`.
    #[must_use]
    pub fn index_of(&self, view: V) -> Option<usize> {
        self.views.iter().position(|v| *v == view)
    }

    /// Frame of the slot at `index`.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<Rect> {
        self.layout.frame(index)
    }

    /// Inserts `view` at `index` (`index == len()` appends).
    pub fn insert(&mut self, index: usize, view: V) -> Result<(), PagerError> {
        if index > self.views.len() {
            return Err(PagerError::out_of_range(index, self.views.len()));
        }
        self.views.insert(index, view);
        self.layout.insert_slot(index);
        self.touch();
        Ok(())
    }

    /// Appends `view`.
    pub fn push(&mut self, view: V) {
        self.views.push(view);
        self.layout.insert_slot(self.views.len() - 1);
        self.touch();
    }

    /// Removes and returns the view at `index`.
    pub fn remove(&mut self, index: usize) -> Result<V, PagerError> {
        if index >= self.views.len() {
            return Err(PagerError::out_of_range(index, self.views.len()));
        }
        let view = self.views.remove(index);
        self.layout.remove_slot(index);
        self.touch();
        Ok(view)
    }

    /// Removes and returns the last view.
    pub fn pop(&mut self) -> Result<V, PagerError> {
        let view = self.views.pop().ok_or(PagerError::Empty)?;
        self.layout.remove_slot(self.views.len());
        self.touch();
        Ok(view)
    }

    /// Puts `view` in the slot at `index`, returning the view it displaces.
    ///
    /// Unlike [`Pager::replace`](crate::Pager::replace), `index` must refer
    /// to an existing view.
    pub fn replace(&mut self, index: usize, view: V) -> Result<V, PagerError> {
        let len = self.views.len();
        let slot = self
            .views
            .get_mut(index)
            .ok_or(PagerError::out_of_range(index, len))?;
        let old = core::mem::replace(slot, view);
        self.layout.reset_slot(index);
        self.touch();
        Ok(old)
    }

    /// Removes every view, returning them in display order.
    pub fn clear(&mut self) -> Vec<V> {
        let views = core::mem::take(&mut self.views);
        self.layout.clear();
        self.touch();
        views
    }

    /// Updates the container size, relaying every slot out.
    pub fn set_container_size(&mut self, container: Size) {
        self.layout.set_container_size(container);
    }

    fn touch(&mut self) {
        debug_assert_eq!(
            self.views.len(),
            self.layout.len(),
            "every view must own exactly one slot"
        );
        self.revision = self.revision.wrapping_add(1);
    }
}
