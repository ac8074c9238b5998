//! Composition layouts.
//!
//! A composition arranges a small, fixed set of named slots (an icon, a
//! title, a subtitle, a disclosure indicator) through a tree of [`Recipe`]s.
//! The items live in one flat list owned by the [`CompositionLayout`]; a
//! recipe refers to them by [`Slot`].
//!
//! ```ignore
//! let cell = CompositionLayout::new(
//!     Recipe::inset(
//!         EdgeInsets::symmetric(8.0, 16.0),
//!         Accessory::new(Recipe::vstack(2.0, [Recipe::view(1), Recipe::view(2)]))
//!             .leading(Recipe::view(0))
//!             .trailing(Recipe::view(3))
//!             .spacing(12.0)
//!             .into(),
//!     ),
//!     [icon, title, subtitle, chevron],
//! );
//! ```

pub mod accessory;
pub mod recipe;

pub use accessory::Accessory;
pub use recipe::Recipe;

use alloc::vec::Vec;

use flowkit_core::{Item, Layout, LayoutState, ProposalSize, Rect, Size};

/// Index of an item within a [`CompositionLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(usize);

impl Slot {
    /// Refers to the item at `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A [`Layout`] driven by a recipe tree.
///
/// Frames of nested recipes overlap their ancestors' areas, so visibility
/// queries scan exhaustively.
#[derive(Debug)]
pub struct CompositionLayout {
    recipe: Recipe,
    items: Vec<Item>,
    state: LayoutState,
}

impl CompositionLayout {
    /// Arranges `items` (in slot order) with `recipe`.
    pub fn new(recipe: Recipe, items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            recipe,
            items: items.into_iter().collect(),
            state: LayoutState::new(),
        }
    }

    /// The current recipe.
    #[must_use]
    pub const fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Replaces the recipe and requests an update.
    pub fn set_recipe(&mut self, recipe: Recipe) {
        self.recipe = recipe;
        self.request_update(true);
    }

    /// The item in `slot`, if any.
    #[must_use]
    pub fn item(&self, slot: Slot) -> Option<&Item> {
        self.items.get(slot.index())
    }

    /// Swaps the item in `slot` for `item`, returning the old one.
    pub fn replace(&mut self, slot: Slot, item: Item) -> Option<Item> {
        let current = self.items.get_mut(slot.index())?;
        let previous = core::mem::replace(current, item);
        self.request_update(true);
        Some(previous)
    }

    /// Drops the cached measurement of the item in `slot`.
    pub fn invalidate(&self, slot: Slot) {
        if let Some(item) = self.item(slot) {
            item.invalidate();
            self.request_update(true);
        }
    }
}

impl Layout for CompositionLayout {
    fn size_that_fits(&self, proposal: ProposalSize) -> Size {
        let proposal = proposal.sanitized();
        let size = self.recipe.measure(&self.items, proposal).sanitized();
        self.state.record_measure(proposal, size);
        size
    }

    fn place(&mut self, bounds: Rect) -> Size {
        let bounds = Rect::new(bounds.origin(), bounds.size().sanitized());
        self.recipe.place(&mut self.items, bounds);
        tracing::debug!(items = self.items.len(), "composition placed");
        self.recipe
            .measure(&self.items, ProposalSize::exact(bounds.size()))
            .sanitized()
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
