//! Layers drawn on top of each other.

use alloc::vec::Vec;

use flowkit_core::{EdgeInsets, Item, Layout, LayoutState, ProposalSize, Rect, Size};

use super::Alignment;

/// Stacks every item within the same bounds with a shared alignment.
///
/// Each item is sized independently and clamped to the inset bounds; the
/// layout's size is the largest item plus insets. Frames overlap, so
/// visibility queries always scan exhaustively.
#[derive(Debug, Default)]
pub struct ZStackLayout {
    alignment: Alignment,
    inset: EdgeInsets,
    items: Vec<Item>,
    state: LayoutState,
}

impl ZStackLayout {
    /// Overlays `items`, centred.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Where each layer sits inside the bounds.
    #[must_use]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the insets around every layer.
    #[must_use]
    pub const fn inset(mut self, inset: EdgeInsets) -> Self {
        self.inset = inset;
        self
    }

    /// Adds a layer on top and requests an update.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
        self.request_update(true);
    }

    fn largest(&self, proposal: ProposalSize) -> Size {
        self.items.iter().fold(Size::zero(), |acc, item| {
            let size = item.size_that_fits(proposal);
            Size::new(acc.width.max(size.width), acc.height.max(size.height))
        })
    }
}

impl Layout for ZStackLayout {
    fn size_that_fits(&self, proposal: ProposalSize) -> Size {
        let proposal = proposal.sanitized();
        let inner = proposal.inset_by(&self.inset);
        let largest = self.largest(inner);

        // Never report more than a bounded proposal.
        let width = inner.width.map_or(largest.width, |w| largest.width.min(w));
        let height = inner.height.map_or(largest.height, |h| largest.height.min(h));

        let size = Size::new(
            width + self.inset.horizontal(),
            height + self.inset.vertical(),
        );
        self.state.record_measure(proposal, size);
        size
    }

    fn place(&mut self, bounds: Rect) -> Size {
        let bounds = Rect::new(bounds.origin(), bounds.size().sanitized());
        let inner = bounds.inset_by(&self.inset);
        let proposal = ProposalSize::exact(inner.size());
        let alignment = self.alignment;

        let mut largest = Size::zero();
        for item in &mut self.items {
            let measured = item.size_that_fits(proposal);
            let size = Size::new(
                measured.width.min(inner.width()),
                measured.height.min(inner.height()),
            );
            largest = Size::new(largest.width.max(size.width), largest.height.max(size.height));
            item.set_frame(Rect::new(alignment.origin(&inner, size), size));
        }

        Size::new(
            largest.width + self.inset.horizontal(),
            largest.height + self.inset.vertical(),
        )
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
}
