//! Dynamic list layout with virtualization.
//!
//! A [`ListLayout`] manages a long, mutable run of items along one axis.
//! Mutations record the first index whose frame became stale; the next place
//! pass keeps every frame before it and resumes from there, so inserting near
//! the end of a thousand-item list measures a handful of items, not all of
//! them. Measurements are cached per item and evicted per item.
//!
//! Frames are sorted and never overlap along the main axis, which lets
//! [`visible_items`](Layout::visible_items) binary-search the visible run.

use alloc::vec::Vec;

use flowkit_core::{
    Axis, EdgeInsets, Item, ItemId, Layout, LayoutState, Point, ProposalSize, Rect, Size,
    VisibilityStrategy,
};

use crate::stack::total_spacing;

/// An ordered, incrementally placed list of items.
#[derive(Debug)]
pub struct ListLayout {
    axis: Axis,
    inset: EdgeInsets,
    spacing: f32,
    items: Vec<Item>,
    strategy: Option<VisibilityStrategy>,
    placed: Option<Rect>,
    first_dirty: Option<usize>,
    state: LayoutState,
}

impl ListLayout {
    /// An empty list along `axis`.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            inset: EdgeInsets::ZERO,
            spacing: 0.0,
            items: Vec::new(),
            strategy: None,
            placed: None,
            first_dirty: Some(0),
            state: LayoutState::new(),
        }
    }

    /// A vertical list.
    #[must_use]
    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    /// A horizontal list.
    #[must_use]
    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Sets the insets around the content.
    #[must_use]
    pub const fn inset(mut self, inset: EdgeInsets) -> Self {
        self.inset = inset;
        self
    }

    /// Sets the gap between consecutive items.
    #[must_use]
    pub const fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Overrides the visibility scan. Custom content that draws outside its
    /// slot (overlapping neighbours) should force
    /// [`VisibilityStrategy::Exhaustive`].
    #[must_use]
    pub const fn strategy(mut self, strategy: VisibilityStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Appends items.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of the item with `id`.
    #[must_use]
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// The item with `id`.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// First index whose frame is stale, if any.
    #[must_use]
    pub const fn first_dirty(&self) -> Option<usize> {
        self.first_dirty
    }

    fn mark_dirty(&mut self, index: usize) {
        self.first_dirty = Some(self.first_dirty.map_or(index, |dirty| dirty.min(index)));
    }

    /// Inserts `items` at `index` (clamped to the length). Frames from
    /// `index` on become stale.
    pub fn insert(&mut self, index: usize, items: impl IntoIterator<Item = Item>) {
        let index = index.min(self.items.len());
        let before = self.items.len();
        self.items.splice(index..index, items);
        let inserted = self.items.len() - before;
        if inserted == 0 {
            return;
        }
        self.mark_dirty(index);
        tracing::debug!(index, inserted, "list insert");
        self.request_update(true);
    }

    /// Appends items at the end.
    pub fn append(&mut self, items: impl IntoIterator<Item = Item>) {
        self.insert(self.items.len(), items);
    }

    /// Removes every item whose id is in `ids` and returns them in list
    /// order. Unknown ids are ignored.
    pub fn delete(&mut self, ids: &[ItemId]) -> Vec<Item> {
        let mut earliest = None;
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.items.len());

        for (index, item) in core::mem::take(&mut self.items).into_iter().enumerate() {
            if ids.contains(&item.id()) {
                earliest.get_or_insert(index);
                removed.push(item);
            } else {
                kept.push(item);
            }
        }
        self.items = kept;

        if let Some(index) = earliest {
            self.mark_dirty(index);
            tracing::debug!(index, removed = removed.len(), "list delete");
            self.request_update(true);
        }
        removed
    }

    /// Moves the item with `id` to `to` (clamped). Returns false if the id
    /// is unknown.
    pub fn move_item(&mut self, id: ItemId, to: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };
        let item = self.items.remove(from);
        let to = to.min(self.items.len());
        self.items.insert(to, item);
        self.mark_dirty(from.min(to));
        self.request_update(false);
        true
    }

    /// Replaces every item.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items = items.into_iter().collect();
        self.mark_dirty(0);
        self.request_update(true);
    }

    /// The content of the item with `id` changed size. Only that item's
    /// cached measurement is dropped.
    pub fn invalidate(&mut self, id: ItemId) {
        if let Some(index) = self.index_of(id) {
            self.items[index].invalidate();
            self.mark_dirty(index);
            self.request_update(true);
        }
    }

    fn child_proposal(&self, cross_available: Option<f32>) -> ProposalSize {
        ProposalSize::from_axes(self.axis, None, cross_available)
    }

    /// Whether the frames placed for `previous` are still valid in `bounds`.
    fn keeps_prefix(&self, bounds: &Rect) -> bool {
        let cross = self.axis.cross();
        self.placed.is_some_and(|previous| {
            previous.origin() == bounds.origin()
                && previous.size().along(cross) == bounds.size().along(cross)
        })
    }
}

impl Layout for ListLayout {
    fn size_that_fits(&self, proposal: ProposalSize) -> Size {
        let proposal = proposal.sanitized();
        let axis = self.axis;
        let cross = axis.cross();

        let cross_available = proposal
            .along(cross)
            .map(|extent| (extent - self.inset.along(cross)).max(0.0));
        let child_proposal = self.child_proposal(cross_available);

        let mut main = total_spacing(self.items.len(), self.spacing);
        let mut widest = 0.0_f32;
        for item in &self.items {
            let size = item.size_that_fits(child_proposal);
            main += size.along(axis);
            widest = widest.max(size.along(cross));
        }

        let size = Size::from_axes(
            axis,
            main + self.inset.along(axis),
            cross_available.unwrap_or(widest) + self.inset.along(cross),
        );
        self.state.record_measure(proposal, size);
        size
    }

    fn place(&mut self, bounds: Rect) -> Size {
        let axis = self.axis;
        let cross = axis.cross();
        let bounds = Rect::new(bounds.origin(), bounds.size().sanitized());

        let start = if self.keeps_prefix(&bounds) {
            self.first_dirty.unwrap_or(self.items.len()).min(self.items.len())
        } else {
            0
        };

        let cross_extent = (bounds.size().along(cross) - self.inset.along(cross)).max(0.0);
        let child_proposal = self.child_proposal(Some(cross_extent));
        let cross_origin = bounds.origin().along(cross) + self.inset.start(cross);
        let main_origin = bounds.origin().along(axis) + self.inset.start(axis);
        let spacing = self.spacing;

        let mut cursor = match start.checked_sub(1) {
            Some(previous) => self.items[previous].frame().max_along(axis) + spacing,
            None => main_origin,
        };

        for item in &mut self.items[start..] {
            let main = item.size_that_fits(child_proposal).along(axis);
            item.set_frame(Rect::new(
                Point::from_axes(axis, cursor, cross_origin),
                Size::from_axes(axis, main, cross_extent),
            ));
            cursor += main + spacing;
        }

        let placed = self.items.len() - start;
        self.placed = Some(bounds);
        self.first_dirty = None;

        let content_end = self
            .items
            .last()
            .map_or(main_origin, |item| item.frame().max_along(axis));
        let trailing_inset = self.inset.along(axis) - self.inset.start(axis);
        let consumed_main = content_end - bounds.origin().along(axis) + trailing_inset;

        tracing::debug!(start, placed, main = consumed_main, "list placed");
        Size::from_axes(axis, consumed_main, bounds.size().along(cross))
    }

    fn items(&self) -> &[Item] {
        &self.items
    }

    fn state(&self) -> &LayoutState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayoutState {
        &mut self.state
    }

    fn visibility(&self) -> VisibilityStrategy {
        // Frames after a mutation are stale and may be out of order.
        if self.first_dirty.is_some() {
            return VisibilityStrategy::Exhaustive;
        }
        self.strategy.unwrap_or(if self.spacing < 0.0 {
            VisibilityStrategy::Exhaustive
        } else {
            VisibilityStrategy::SortedRun(self.axis)
        })
    }
}
