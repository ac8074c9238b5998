//! Stacking layouts.
//!
//! [`StackLayout`] arranges items one after another along a main axis,
//! filling the cross axis, with insets around the content and fixed spacing
//! between items. The vertical and horizontal variants are the same
//! algorithm run on transposed axes; see [`vstack()`] and [`hstack()`].
//!
//! [`ZStackLayout`] overlays items on top of each other instead.

pub mod hstack;
pub mod vstack;
pub mod zstack;

pub use hstack::hstack;
pub use vstack::vstack;
pub use zstack::ZStackLayout;

use alloc::vec::Vec;

use flowkit_core::{
    Axis, EdgeInsets, Item, ItemId, Layout, LayoutState, Point, ProposalSize, Rect, Size,
    VisibilityStrategy,
};

/// Where an item sits on a stack's cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossAlignment {
    /// Stretch to the full cross extent.
    #[default]
    Fill,
    /// Keep the measured extent, align to the leading (or top) edge.
    Leading,
    /// Keep the measured extent, centred.
    Center,
    /// Keep the measured extent, align to the trailing (or bottom) edge.
    Trailing,
}

impl CrossAlignment {
    /// Offset and extent of an item measuring `measured` in a stack whose
    /// cross extent is `available`.
    #[must_use]
    pub fn resolve(self, measured: f32, available: f32) -> (f32, f32) {
        let fitted = measured.min(available);
        match self {
            Self::Fill => (0.0, available),
            Self::Leading => (0.0, fitted),
            Self::Center => ((available - fitted) / 2.0, fitted),
            Self::Trailing => (available - fitted, fitted),
        }
    }
}

/// Two-dimensional alignment used by overlapping layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Top-left corner.
    TopLeading,
    /// Top edge, centred horizontally.
    Top,
    /// Top-right corner.
    TopTrailing,
    /// Left edge, centred vertically.
    Leading,
    /// Centre.
    #[default]
    Center,
    /// Right edge, centred vertically.
    Trailing,
    /// Bottom-left corner.
    BottomLeading,
    /// Bottom edge, centred horizontally.
    Bottom,
    /// Bottom-right corner.
    BottomTrailing,
}

impl Alignment {
    /// Origin of a child of `size` aligned inside `bounds`.
    #[must_use]
    pub fn origin(self, bounds: &Rect, size: Size) -> Point {
        let center_x = bounds.x() + (bounds.width() - size.width) / 2.0;
        let center_y = bounds.y() + (bounds.height() - size.height) / 2.0;
        let trailing_x = bounds.max_x() - size.width;
        let bottom_y = bounds.max_y() - size.height;

        match self {
            Self::TopLeading => Point::new(bounds.x(), bounds.y()),
            Self::Top => Point::new(center_x, bounds.y()),
            Self::TopTrailing => Point::new(trailing_x, bounds.y()),
            Self::Leading => Point::new(bounds.x(), center_y),
            Self::Center => Point::new(center_x, center_y),
            Self::Trailing => Point::new(trailing_x, center_y),
            Self::BottomLeading => Point::new(bounds.x(), bottom_y),
            Self::Bottom => Point::new(center_x, bottom_y),
            Self::BottomTrailing => Point::new(trailing_x, bottom_y),
        }
    }
}

/// Total spacing contributed by `count` items.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn total_spacing(count: usize, spacing: f32) -> f32 {
    if count > 1 {
        (count - 1) as f32 * spacing
    } else {
        0.0
    }
}

/// Layout engine behind [`vstack()`] and [`hstack()`].
///
/// Items are measured with the cross extent left after insets and an
/// unbounded main axis, then placed back to back. Content that overflows the
/// bounds is neither clipped nor wrapped; make the host scrollable instead.
#[derive(Debug)]
pub struct StackLayout {
    axis: Axis,
    inset: EdgeInsets,
    spacing: f32,
    alignment: CrossAlignment,
    items: Vec<Item>,
    /// Items were added since the last place pass and still hold zero frames.
    unplaced: bool,
    state: LayoutState,
}

impl StackLayout {
    /// An empty stack along `axis`.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            inset: EdgeInsets::ZERO,
            spacing: 0.0,
            alignment: CrossAlignment::Fill,
            items: Vec::new(),
            unplaced: false,
            state: LayoutState::new(),
        }
    }

    /// Sets the insets around the content.
    #[must_use]
    pub const fn inset(mut self, inset: EdgeInsets) -> Self {
        self.inset = inset;
        self
    }

    /// Sets the spacing between consecutive items.
    #[must_use]
    pub const fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the cross-axis alignment.
    #[must_use]
    pub const fn alignment(mut self, alignment: CrossAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Appends items.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self.unplaced = true;
        self
    }

    /// The main axis.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Changes the insets and requests an update.
    pub fn set_inset(&mut self, inset: EdgeInsets) {
        self.inset = inset;
        self.request_update(true);
    }

    /// Changes the spacing and requests an update.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
        self.request_update(true);
    }

    /// Appends one item and requests an update.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
        self.unplaced = true;
        self.request_update(true);
    }

    /// Inserts an item at `index` (clamped to the length) and requests an
    /// update.
    pub fn insert(&mut self, index: usize, item: Item) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.unplaced = true;
        self.request_update(true);
    }

    /// Removes the item with `id`, if present.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        let removed = self.items.remove(index);
        self.request_update(true);
        Some(removed)
    }

    /// Drops the cached measurement of one item after its content changed.
    pub fn invalidate(&self, id: ItemId) {
        if let Some(item) = self.items.iter().find(|item| item.id() == id) {
            item.invalidate();
            self.request_update(true);
        }
    }

    fn child_proposal(&self, cross_available: Option<f32>) -> ProposalSize {
        ProposalSize::from_axes(self.axis, None, cross_available)
    }
}

impl Layout for StackLayout {
    fn size_that_fits(&self, proposal: ProposalSize) -> Size {
        let proposal = proposal.sanitized();
        let axis = self.axis;
        let cross = axis.cross();

        let cross_available = proposal
            .along(cross)
            .map(|extent| (extent - self.inset.along(cross)).max(0.0));
        let child_proposal = self.child_proposal(cross_available);

        let mut main = 0.0_f32;
        let mut widest = 0.0_f32;
        for item in &self.items {
            let size = item.size_that_fits(child_proposal);
            main += size.along(axis);
            widest = widest.max(size.along(cross));
        }
        main += total_spacing(self.items.len(), self.spacing);

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
        let bounds_size = bounds.size().sanitized();

        let cross_extent = (bounds_size.along(cross) - self.inset.along(cross)).max(0.0);
        let child_proposal = self.child_proposal(Some(cross_extent));
        let cross_origin = bounds.origin().along(cross) + self.inset.start(cross);
        let main_origin = bounds.origin().along(axis) + self.inset.start(axis);

        let spacing = self.spacing;
        let alignment = self.alignment;
        let mut cursor = main_origin;

        for (index, item) in self.items.iter_mut().enumerate() {
            if index > 0 {
                cursor += spacing;
            }
            let measured = item.size_that_fits(child_proposal);
            let main = measured.along(axis);
            let (offset, cross_size) = alignment.resolve(measured.along(cross), cross_extent);

            item.set_frame(Rect::new(
                Point::from_axes(axis, cursor, cross_origin + offset),
                Size::from_axes(axis, main, cross_size),
            ));
            cursor += main;
        }

        self.unplaced = false;
        let consumed_main = cursor - main_origin + self.inset.along(axis);
        tracing::debug!(
            axis = ?axis,
            items = self.items.len(),
            main = consumed_main,
            "stack placed"
        );
        Size::from_axes(axis, consumed_main, bounds_size.along(cross))
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
        // Negative spacing overlaps neighbours; new items sit at the origin
        // until placed.
        if self.spacing < 0.0 || self.unplaced {
            VisibilityStrategy::Exhaustive
        } else {
            VisibilityStrategy::SortedRun(self.axis)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{rc::Rc, vec};
    use flowkit_core::FixedContent;

    #[test]
    fn test_cross_alignment_resolve() {
        assert_eq!(CrossAlignment::Fill.resolve(40.0, 100.0), (0.0, 100.0));
        assert_eq!(CrossAlignment::Leading.resolve(40.0, 100.0), (0.0, 40.0));
        assert_eq!(CrossAlignment::Center.resolve(40.0, 100.0), (30.0, 40.0));
        assert_eq!(CrossAlignment::Trailing.resolve(40.0, 100.0), (60.0, 40.0));
        // Oversized content is clamped to the available extent.
        assert_eq!(CrossAlignment::Center.resolve(140.0, 100.0), (0.0, 100.0));
    }

    #[test]
    fn test_alignment_origin() {
        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let size = Size::new(40.0, 20.0);
        assert_eq!(Alignment::Center.origin(&bounds, size), Point::new(30.0, 40.0));
        assert_eq!(Alignment::BottomTrailing.origin(&bounds, size), Point::new(60.0, 80.0));
        assert_eq!(Alignment::TopLeading.origin(&bounds, size), Point::zero());
    }

    #[test]
    fn test_mutations_invalidate_and_place_again() {
        let mut stack = StackLayout::new(Axis::Vertical).spacing(10.0);
        let first = Item::from_content(FixedContent::new(Size::new(10.0, 10.0)));
        let first_id = first.id();
        stack.push(first);
        stack.insert(0, Item::from_content(FixedContent::new(Size::new(10.0, 30.0))));

        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 500.0);
        let consumed = stack.place(bounds);
        assert_eq!(consumed.height, 50.0);
        assert_eq!(stack.items()[1].frame().y(), 40.0);

        assert!(stack.remove(first_id).is_some());
        assert!(stack.remove(first_id).is_none());
        assert_eq!(stack.place(bounds).height, 30.0);
    }

    #[test]
    fn test_invalidate_picks_up_new_size() {
        let content = Rc::new(FixedContent::new(Size::new(10.0, 10.0)));
        let item = Item::new(content.clone());
        let id = item.id();
        let mut stack = StackLayout::new(Axis::Vertical).with_items(vec![item]);

        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        assert_eq!(stack.place(bounds).height, 10.0);

        content.set_size(Size::new(10.0, 25.0));
        stack.invalidate(id);
        assert_eq!(stack.place(bounds).height, 25.0);
    }

    #[test]
    fn test_visibility_between_push_and_place() {
        let fixed = || Item::from_content(FixedContent::new(Size::new(10.0, 20.0)));
        let viewport = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let mut stack = StackLayout::new(Axis::Vertical).with_items(vec![fixed(), fixed()]);
        stack.place(viewport);
        assert_eq!(stack.visibility(), VisibilityStrategy::SortedRun(Axis::Vertical));

        stack.push(fixed());
        assert_eq!(stack.visibility(), VisibilityStrategy::Exhaustive);
        // Stale answer: the new item has no area until the next pass.
        assert_eq!(stack.visible_items(viewport).len(), 2);

        stack.insert(0, fixed());
        assert_eq!(stack.visible_items(viewport).len(), 2);

        stack.place(viewport);
        assert_eq!(stack.visibility(), VisibilityStrategy::SortedRun(Axis::Vertical));
        let ys: Vec<f32> = stack.visible_items(viewport).iter().map(|item| item.frame().y()).collect();
        assert_eq!(ys, vec![0.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn test_negative_spacing_disables_sorted_scan() {
        let stack = StackLayout::new(Axis::Vertical).spacing(-5.0);
        assert_eq!(stack.visibility(), VisibilityStrategy::Exhaustive);
        let stack = StackLayout::new(Axis::Horizontal).spacing(5.0);
        assert_eq!(
            stack.visibility(),
            VisibilityStrategy::SortedRun(Axis::Horizontal)
        );
    }
}
