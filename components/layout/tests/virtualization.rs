//! Property tests for virtualization and stacking.

use flowkit_layout::{
    EdgeInsets, FixedContent, Item, ItemId, Layout, ListLayout, ProposalSize, Rect, Size,
    VisibilityStrategy, visibility, vstack,
};
use proptest::prelude::*;

fn items(heights: &[u16]) -> Vec<Item> {
    heights
        .iter()
        .map(|&h| Item::from_content(FixedContent::new(Size::new(100.0, f32::from(h)))))
        .collect()
}

fn ids(items: &[&Item]) -> Vec<ItemId> {
    items.iter().map(|item| item.id()).collect()
}

fn frames(layout: &impl Layout) -> Vec<Rect> {
    layout.items().iter().map(Item::frame).collect()
}

/// A list mutation.
#[derive(Debug, Clone)]
enum Edit {
    Insert { at: usize, heights: Vec<u16> },
    Delete { at: usize },
    Invalidate { at: usize },
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..64, prop::collection::vec(0u16..120, 1..5))
            .prop_map(|(at, heights)| Edit::Insert { at, heights }),
        (0usize..64).prop_map(|at| Edit::Delete { at }),
        (0usize..64).prop_map(|at| Edit::Invalidate { at }),
    ]
}

proptest! {
    /// The binary-searched run equals a brute-force scan.
    #[test]
    fn sorted_run_matches_exhaustive(
        heights in prop::collection::vec(0u16..200, 0..300),
        spacing in 0u16..20,
        offset_y in 0u16..20_000,
        offset_x in 0u16..150,
        viewport_height in 0u16..1_000,
    ) {
        let mut list = ListLayout::vertical()
            .spacing(f32::from(spacing))
            .with_items(items(&heights));
        list.place(Rect::from_xywh(0.0, 0.0, 120.0, 600.0));
        prop_assert_eq!(list.visibility(), VisibilityStrategy::SortedRun(flowkit_layout::Axis::Vertical));

        let viewport = Rect::from_xywh(
            f32::from(offset_x),
            f32::from(offset_y),
            120.0,
            f32::from(viewport_height),
        );
        let fast = list.visible_items(viewport);
        let slow = visibility::exhaustive(list.items(), &viewport);
        prop_assert_eq!(ids(&fast), ids(&slow));
    }

    /// A stack's main extent is the sum of its items, the gaps and the insets.
    #[test]
    fn stack_main_extent_is_additive(
        heights in prop::collection::vec(0u16..200, 0..40),
        spacing in 0u16..20,
        inset in 0u16..30,
    ) {
        let inset = f32::from(inset);
        let stack = vstack(items(&heights))
            .spacing(f32::from(spacing))
            .inset(EdgeInsets::all(inset));

        let size = stack.size_that_fits(ProposalSize::new(320.0, None));
        let gaps = heights.len().saturating_sub(1) as f32 * f32::from(spacing);
        let expected: f32 = heights.iter().map(|&h| f32::from(h)).sum::<f32>() + gaps + 2.0 * inset;
        prop_assert_eq!(size.height, expected);
        prop_assert_eq!(size.width, 320.0);
    }

    /// Placing twice in the same bounds yields the same frames and size.
    #[test]
    fn stack_place_is_idempotent(
        heights in prop::collection::vec(0u16..200, 0..40),
        spacing in 0u16..20,
        width in 0u16..500,
    ) {
        let mut stack = vstack(items(&heights)).spacing(f32::from(spacing));
        let measured = stack.size_that_fits(ProposalSize::new(f32::from(width), None));
        let bounds = Rect::from_size(measured);

        let first = stack.place(bounds);
        let first_frames = frames(&stack);
        let second = stack.place(bounds);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first, measured);
        prop_assert_eq!(first_frames, frames(&stack));
    }

    /// Incremental placement after edits matches placing from scratch.
    #[test]
    fn incremental_place_matches_full(
        heights in prop::collection::vec(0u16..120, 0..60),
        edits in prop::collection::vec(arb_edit(), 0..12),
    ) {
        let bounds = Rect::from_xywh(0.0, 0.0, 200.0, 400.0);
        let mut list = ListLayout::vertical()
            .spacing(3.0)
            .inset(EdgeInsets::all(4.0))
            .with_items(items(&heights));
        list.place(bounds);

        for edit in edits {
            match edit {
                Edit::Insert { at, heights } => list.insert(at, items(&heights)),
                Edit::Delete { at } => {
                    if let Some(id) = list.items().get(at).map(Item::id) {
                        list.delete(&[id]);
                    }
                }
                Edit::Invalidate { at } => {
                    if let Some(id) = list.items().get(at).map(Item::id) {
                        list.invalidate(id);
                    }
                }
            }
            list.place(bounds);
        }

        let mut fresh = ListLayout::vertical()
            .spacing(3.0)
            .inset(EdgeInsets::all(4.0))
            .with_items(list.items().iter().map(|item| Item::new(item.content().clone())));
        let fresh_size = fresh.place(bounds);

        prop_assert_eq!(list.place(bounds), fresh_size);
        prop_assert_eq!(frames(&list), frames(&fresh));
    }
}

#[test]
fn thousand_rows_scenario() {
    let mut list = ListLayout::vertical().with_items(items(&[50; 1000]));
    list.place(Rect::from_xywh(0.0, 0.0, 320.0, 400.0));

    let visible = list.visible_items(Rect::from_xywh(0.0, 2000.0, 320.0, 400.0));
    let indices: Vec<usize> = visible
        .iter()
        .filter_map(|item| list.index_of(item.id()))
        .collect();
    assert_eq!(indices, (40..=48).collect::<Vec<_>>());
}
