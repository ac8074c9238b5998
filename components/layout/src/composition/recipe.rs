//! Composition recipes: nestable measure/place nodes.

use alloc::{boxed::Box, vec::Vec};

use flowkit_core::{Axis, EdgeInsets, Item, Point, ProposalSize, Rect, Size};

use super::{Slot, accessory::Accessory};
use crate::stack::total_spacing;

/// One node of a composition tree.
///
/// Every variant answers the same two questions as a [`Layout`](flowkit_core::Layout),
/// delegating to its children, so recipes nest to any depth.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Recipe {
    /// Takes no space.
    #[default]
    Empty,
    /// A single item of the composition.
    View(Slot),
    /// Insets its content.
    Inset {
        /// The insets.
        inset: EdgeInsets,
        /// What is inset.
        content: Box<Recipe>,
    },
    /// Leading accessory, center, trailing accessory.
    Accessory(Accessory),
    /// Children back to back along an axis, filling the cross axis.
    Stack {
        /// Main axis.
        axis: Axis,
        /// Gap between children.
        spacing: f32,
        /// Children, in order.
        children: Vec<Recipe>,
    },
}

impl Recipe {
    /// A recipe showing the item in `slot`.
    #[must_use]
    pub const fn view(slot: usize) -> Self {
        Self::View(Slot::new(slot))
    }

    /// Wraps `content` in insets.
    #[must_use]
    pub fn inset(inset: EdgeInsets, content: Self) -> Self {
        Self::Inset {
            inset,
            content: Box::new(content),
        }
    }

    /// A vertical stack of recipes.
    #[must_use]
    pub fn vstack(spacing: f32, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Stack {
            axis: Axis::Vertical,
            spacing,
            children: children.into_iter().collect(),
        }
    }

    /// A horizontal stack of recipes.
    #[must_use]
    pub fn hstack(spacing: f32, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Stack {
            axis: Axis::Horizontal,
            spacing,
            children: children.into_iter().collect(),
        }
    }

    /// Whether this recipe can never take space.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Size this recipe wants for `proposal`.
    #[must_use]
    pub fn measure(&self, items: &[Item], proposal: ProposalSize) -> Size {
        match self {
            Self::Empty => Size::zero(),
            Self::View(slot) => items
                .get(slot.index())
                .map_or(Size::zero(), |item| item.size_that_fits(proposal)),
            Self::Inset { inset, content } => {
                let inner = content.measure(items, proposal.inset_by(inset));
                Size::new(inner.width + inset.horizontal(), inner.height + inset.vertical())
            }
            Self::Accessory(accessory) => accessory.measure(items, proposal),
            Self::Stack {
                axis,
                spacing,
                children,
            } => measure_stack(items, *axis, *spacing, children, proposal),
        }
    }

    /// Writes frames for every item under this recipe within `bounds`.
    pub fn place(&self, items: &mut [Item], bounds: Rect) {
        match self {
            Self::Empty => {}
            Self::View(slot) => {
                if let Some(item) = items.get_mut(slot.index()) {
                    item.set_frame(bounds);
                }
            }
            Self::Inset { inset, content } => content.place(items, bounds.inset_by(inset)),
            Self::Accessory(accessory) => accessory.place(items, bounds),
            Self::Stack {
                axis,
                spacing,
                children,
            } => place_stack(items, *axis, *spacing, children, bounds),
        }
    }
}

impl From<Accessory> for Recipe {
    fn from(accessory: Accessory) -> Self {
        Self::Accessory(accessory)
    }
}

fn measure_stack(
    items: &[Item],
    axis: Axis,
    spacing: f32,
    children: &[Recipe],
    proposal: ProposalSize,
) -> Size {
    let cross = axis.cross();
    let cross_available = proposal.along(cross);
    let child_proposal = ProposalSize::from_axes(axis, None, cross_available);

    let mut main = total_spacing(children.len(), spacing);
    let mut widest = 0.0_f32;
    for child in children {
        let size = child.measure(items, child_proposal);
        main += size.along(axis);
        widest = widest.max(size.along(cross));
    }
    Size::from_axes(axis, main, cross_available.unwrap_or(widest))
}

fn place_stack(items: &mut [Item], axis: Axis, spacing: f32, children: &[Recipe], bounds: Rect) {
    let cross = axis.cross();
    let cross_extent = bounds.size().along(cross);
    let child_proposal = ProposalSize::from_axes(axis, None, Some(cross_extent));
    let cross_origin = bounds.origin().along(cross);
    let mut cursor = bounds.origin().along(axis);

    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            cursor += spacing;
        }
        let main = child.measure(items, child_proposal).along(axis);
        child.place(
            items,
            Rect::new(
                Point::from_axes(axis, cursor, cross_origin),
                Size::from_axes(axis, main, cross_extent),
            ),
        );
        cursor += main;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use flowkit_core::FixedContent;

    fn items(sizes: &[(f32, f32)]) -> Vec<Item> {
        sizes
            .iter()
            .map(|&(w, h)| Item::from_content(FixedContent::new(Size::new(w, h))))
            .collect()
    }

    #[test]
    fn test_inset_adds_edges() {
        let items = items(&[(30.0, 10.0)]);
        let recipe = Recipe::inset(EdgeInsets::new(1.0, 2.0, 3.0, 4.0), Recipe::view(0));
        assert_eq!(
            recipe.measure(&items, ProposalSize::UNSPECIFIED),
            Size::new(37.0, 13.0)
        );
    }

    #[test]
    fn test_missing_slot_is_empty() {
        let mut items = items(&[(30.0, 10.0)]);
        let recipe = Recipe::view(7);
        assert_eq!(recipe.measure(&items, ProposalSize::UNSPECIFIED), Size::zero());
        recipe.place(&mut items, Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        assert_eq!(items[0].frame(), Rect::default());
    }

    #[test]
    fn test_stack_of_label_rows() {
        let mut items = items(&[(80.0, 20.0), (60.0, 14.0)]);
        let recipe = Recipe::inset(
            EdgeInsets::all(8.0),
            Recipe::vstack(4.0, vec![Recipe::view(0), Recipe::view(1)]),
        );

        let size = recipe.measure(&items, ProposalSize::new(200.0, None));
        assert_eq!(size, Size::new(200.0, 54.0)); // 8 + 20 + 4 + 14 + 8

        recipe.place(&mut items, Rect::from_size(size));
        assert_eq!(items[0].frame(), Rect::from_xywh(8.0, 8.0, 184.0, 20.0));
        assert_eq!(items[1].frame(), Rect::from_xywh(8.0, 32.0, 184.0, 14.0));
    }

    #[test]
    fn test_empty_takes_no_space() {
        let items = items(&[]);
        assert!(Recipe::Empty.is_empty());
        assert_eq!(
            Recipe::hstack(10.0, vec![Recipe::Empty]).measure(&items, ProposalSize::UNSPECIFIED),
            Size::zero()
        );
    }
}
