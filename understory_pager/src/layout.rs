// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page slots: one full-bleed frame per view, laid out left to right.

use kurbo::{Point, Rect, Size};

/// How a fractional scroll position resolves to a displayed page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PagePolicy {
    /// Nearest page, halves rounding away from zero.
    #[default]
    Rounded,
    /// Direction-aware: while the current drag moves toward increasing
    /// offsets the page rounds down, otherwise up.
    ///
    /// This keeps the displayed page from flipping to the next one as soon as
    /// a drag crosses the midpoint. Without a recorded drag origin it behaves
    /// like [`PagePolicy::Rounded`].
    Retained,
}

/// Frames of every page slot within the scrollable content.
///
/// Slot `i` starts at `container.width * i` and is exactly the container's
/// size. Frames are shifted in place on insert and remove, so an edit at `i`
/// only touches the slots after it.
#[derive(Clone, Debug)]
pub struct PagingLayout {
    container: Size,
    frames: Vec<Rect>,
}

impl PagingLayout {
    /// Creates an empty layout for a container of the given size.
    #[must_use]
    pub fn new(container: Size) -> Self {
        Self {
            container,
            frames: Vec::new(),
        }
    }

    /// The container (viewport) size.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container
    }

    /// Updates the container size and lays every slot out again.
    pub fn set_container_size(&mut self, container: Size) {
        if self.container == container {
            return;
        }
        self.container = container;
        self.relayout_from(0);
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames of all slots, in page order.
    #[must_use]
    pub fn frames(&self) -> &[Rect] {
        &self.frames
    }

    /// Frame of slot `index`, if present.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<Rect> {
        self.frames.get(index).copied()
    }

    /// The frame slot `index` occupies when laid out from scratch.
    #[must_use]
    pub fn slot_rect(&self, index: usize) -> Rect {
        Rect::from_origin_size(self.offset_for(index), self.container)
    }

    /// Scroll offset that shows slot `index`.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> Point {
        Point::new(self.container.width * index as f64, 0.0)
    }

    /// Scrollable extent: one container width per slot.
    #[must_use]
    pub fn content_size(&self) -> Size {
        Size::new(
            self.container.width * self.frames.len() as f64,
            self.container.height,
        )
    }

    /// Inserts a slot at `index`, shifting later slots right by one page.
    ///
    /// `index` must be at most [`len`](Self::len).
    pub fn insert_slot(&mut self, index: usize) {
        debug_assert!(index <= self.frames.len(), "slot index out of range");
        let frame = self.slot_rect(index);
        self.frames.insert(index, frame);
        self.relayout_from(index + 1);
    }

    /// Removes slot `index`, shifting later slots left by one page.
    ///
    /// `index` must be less than [`len`](Self::len).
    pub fn remove_slot(&mut self, index: usize) -> Rect {
        debug_assert!(index < self.frames.len(), "slot index out of range");
        let removed = self.frames.remove(index);
        self.relayout_from(index);
        removed
    }

    /// Puts slot `index` back at its from-scratch frame.
    pub fn reset_slot(&mut self, index: usize) {
        let frame = self.slot_rect(index);
        if let Some(slot) = self.frames.get_mut(index) {
            *slot = frame;
        }
    }

    /// Removes every slot.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Resolves a horizontal scroll offset to the page being displayed.
    ///
    /// `drag_origin` is the offset at which the current drag began; it only
    /// matters for [`PagePolicy::Retained`]. Offsets past either end (bounce)
    /// resolve to the first or last page. Returns `None` when there are no
    /// slots or the container has no width.
    #[must_use]
    pub fn page_index(
        &self,
        offset_x: f64,
        policy: PagePolicy,
        drag_origin: Option<f64>,
    ) -> Option<usize> {
        let width = self.container.width;
        if self.frames.is_empty() || !offset_x.is_finite() || width.is_nan() || width <= 0.0 {
            return None;
        }

        let raw = offset_x / width;
        let page = match (policy, drag_origin) {
            (PagePolicy::Retained, Some(origin)) if origin < offset_x => raw.floor(),
            (PagePolicy::Retained, Some(_)) => raw.ceil(),
            (PagePolicy::Retained, None) | (PagePolicy::Rounded, _) => raw.round(),
        };

        let last = self.frames.len() - 1;
        if page <= 0.0 {
            return Some(0);
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "page is finite and non-negative; result is clamped immediately after"
        )]
        let page = page as usize;
        Some(page.min(last))
    }

    /// Recomputes every slot from `start` on; each frame depends only on its index.
    fn relayout_from(&mut self, start: usize) {
        for index in start..self.frames.len() {
            self.frames[index] = self.slot_rect(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(n: usize) -> PagingLayout {
        let mut layout = PagingLayout::new(Size::new(100.0, 50.0));
        for i in 0..n {
            layout.insert_slot(i);
        }
        layout
    }

    #[test]
    fn slots_are_full_bleed_and_adjacent() {
        let layout = layout(3);
        assert_eq!(layout.frame(0), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        assert_eq!(layout.frame(2), Some(Rect::new(200.0, 0.0, 300.0, 50.0)));
        assert_eq!(layout.content_size(), Size::new(300.0, 50.0));
    }

    #[test]
    fn insert_shifts_only_later_slots() {
        let mut layout = layout(3);
        layout.insert_slot(1);
        let xs: Vec<f64> = layout.frames().iter().map(|r| r.x0).collect();
        assert_eq!(xs, [0.0, 100.0, 200.0, 300.0]);
        assert_eq!(layout.content_size().width, 400.0);
    }

    #[test]
    fn remove_shifts_later_slots_back() {
        let mut layout = layout(4);
        let removed = layout.remove_slot(1);
        assert_eq!(removed.x0, 100.0);
        let xs: Vec<f64> = layout.frames().iter().map(|r| r.x0).collect();
        assert_eq!(xs, [0.0, 100.0, 200.0]);
    }

    #[test]
    fn shifted_slots_stay_exact_for_fractional_widths() {
        let width = 12.857148907735757;
        let mut layout = PagingLayout::new(Size::new(width, 10.0));
        layout.insert_slot(0);
        layout.insert_slot(1);
        let before = layout.frames().to_vec();

        layout.insert_slot(0);
        layout.remove_slot(0);
        assert_eq!(layout.frames(), before.as_slice());
        for (i, frame) in layout.frames().iter().enumerate() {
            assert_eq!(*frame, layout.slot_rect(i), "slot {i} drifted");
        }
    }

    #[test]
    fn resize_relays_out_every_slot() {
        let mut layout = layout(3);
        layout.set_container_size(Size::new(320.0, 480.0));
        assert_eq!(layout.frame(1), Some(Rect::new(320.0, 0.0, 640.0, 480.0)));
        assert_eq!(layout.content_size(), Size::new(960.0, 480.0));
    }

    #[test]
    fn rounded_page_uses_nearest_integer() {
        let layout = layout(3);
        assert_eq!(layout.page_index(150.0, PagePolicy::Rounded, None), Some(2));
        assert_eq!(layout.page_index(149.0, PagePolicy::Rounded, None), Some(1));
        assert_eq!(layout.page_index(0.0, PagePolicy::Rounded, None), Some(0));
    }

    #[test]
    fn retained_page_follows_drag_direction() {
        let layout = layout(3);
        // Dragging toward larger offsets keeps the lower page.
        assert_eq!(
            layout.page_index(240.0, PagePolicy::Retained, Some(50.0)),
            Some(2)
        );
        assert_eq!(
            layout.page_index(160.0, PagePolicy::Retained, Some(50.0)),
            Some(1)
        );
        // Dragging back keeps the higher page.
        assert_eq!(
            layout.page_index(40.0, PagePolicy::Retained, Some(200.0)),
            Some(1)
        );
        // No recorded drag: falls back to rounding.
        assert_eq!(layout.page_index(160.0, PagePolicy::Retained, None), Some(2));
    }

    #[test]
    fn page_index_clamps_overscroll() {
        let layout = layout(3);
        assert_eq!(layout.page_index(-30.0, PagePolicy::Rounded, None), Some(0));
        assert_eq!(layout.page_index(290.0, PagePolicy::Rounded, None), Some(2));
    }

    #[test]
    fn page_index_needs_slots_and_width() {
        assert_eq!(layout(0).page_index(0.0, PagePolicy::Rounded, None), None);
        let mut zero = layout(2);
        zero.set_container_size(Size::ZERO);
        assert_eq!(zero.page_index(0.0, PagePolicy::Rounded, None), None);
    }
}
