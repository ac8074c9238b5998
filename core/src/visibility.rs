//! Visible-range queries.
//!
//! Virtualization rests on one trick: when frames are laid out in increasing
//! order along an axis without overlapping, the visible items form one
//! contiguous run. Finding that run costs a binary search plus the length of
//! the run, so the number of realized items stays near
//! `viewport / average item extent` no matter how long the list is.
//!
//! Layouts that cannot promise ordered, non-overlapping frames (z-stacks,
//! compositions, wrapping flows) fall back to an exhaustive scan.

use alloc::vec::Vec;

use crate::{Axis, Item, Rect};

/// How a visibility query may walk a layout's frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VisibilityStrategy {
    /// Frames are sorted along the axis and never overlap on it. The query
    /// binary-searches the first candidate and stops at the first item past
    /// the viewport.
    SortedRun(Axis),
    /// Test every frame.
    #[default]
    Exhaustive,
}

/// Items of `items` visible in `viewport`, in traversal order.
#[must_use]
pub fn visible_items<'a>(
    items: &'a [Item],
    viewport: &Rect,
    strategy: VisibilityStrategy,
) -> Vec<&'a Item> {
    match strategy {
        VisibilityStrategy::SortedRun(axis) => sorted_run(items, viewport, axis),
        VisibilityStrategy::Exhaustive => exhaustive(items, viewport),
    }
}

/// Brute-force scan. Always correct.
#[must_use]
pub fn exhaustive<'a>(items: &'a [Item], viewport: &Rect) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| item.frame().is_visible_in(viewport))
        .collect()
}

fn sorted_run<'a>(items: &'a [Item], viewport: &Rect, axis: Axis) -> Vec<&'a Item> {
    debug_assert!(
        is_monotonic(items, axis),
        "frames are not sorted along {axis:?}; use VisibilityStrategy::Exhaustive"
    );

    let start = items.partition_point(|item| item.frame().max_along(axis) <= viewport.min_along(axis));
    let end_edge = viewport.max_along(axis);

    let run: Vec<&Item> = items[start..]
        .iter()
        .take_while(|item| item.frame().min_along(axis) <= end_edge)
        .filter(|item| item.frame().is_visible_in(viewport))
        .collect();

    tracing::trace!(start, len = run.len(), "visible run");
    run
}

/// Whether frames are ordered and non-overlapping along `axis`.
#[must_use]
pub fn is_monotonic(items: &[Item], axis: Axis) -> bool {
    items.windows(2).all(|pair| {
        let (a, b) = (pair[0].frame(), pair[1].frame());
        a.max_along(axis) <= b.min_along(axis) && a.min_along(axis) <= b.min_along(axis)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Size, content::FixedContent};

    fn column(count: usize, height: f32) -> Vec<Item> {
        (0..count)
            .map(|i| {
                let mut item = Item::from_content(FixedContent::new(Size::new(100.0, height)));
                #[allow(clippy::cast_precision_loss)]
                let y = i as f32 * height;
                item.set_frame(Rect::from_xywh(0.0, y, 100.0, height));
                item
            })
            .collect()
    }

    fn indices(items: &[Item], visible: &[&Item]) -> Vec<usize> {
        visible
            .iter()
            .map(|v| items.iter().position(|i| i.id() == v.id()).unwrap())
            .collect()
    }

    #[test]
    fn test_sorted_run_matches_exhaustive() {
        let items = column(1000, 50.0);
        let viewport = Rect::from_xywh(0.0, 2000.0, 100.0, 400.0);

        let fast = visible_items(&items, &viewport, VisibilityStrategy::SortedRun(Axis::Vertical));
        let slow = exhaustive(&items, &viewport);

        assert_eq!(indices(&items, &fast), (40..=48).collect::<Vec<_>>());
        assert_eq!(indices(&items, &fast), indices(&items, &slow));
    }

    #[test]
    fn test_viewport_past_the_end() {
        let items = column(10, 50.0);
        let viewport = Rect::from_xywh(0.0, 600.0, 100.0, 400.0);
        let visible = visible_items(&items, &viewport, VisibilityStrategy::SortedRun(Axis::Vertical));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_unplaced_items_are_not_visible() {
        let items: Vec<Item> = (0..5)
            .map(|_| Item::from_content(FixedContent::new(Size::new(10.0, 10.0))))
            .collect();
        let viewport = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        assert!(visible_items(&items, &viewport, VisibilityStrategy::SortedRun(Axis::Vertical)).is_empty());
        assert!(exhaustive(&items, &viewport).is_empty());
    }

    #[test]
    fn test_cross_axis_is_filtered() {
        let items = column(10, 50.0);
        let viewport = Rect::from_xywh(200.0, 0.0, 100.0, 400.0);
        let visible = visible_items(&items, &viewport, VisibilityStrategy::SortedRun(Axis::Vertical));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_monotonic_detection() {
        let items = column(4, 10.0);
        assert!(is_monotonic(&items, Axis::Vertical));
        assert!(!is_monotonic(&items, Axis::Horizontal));
    }
}
