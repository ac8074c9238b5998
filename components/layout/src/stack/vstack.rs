//! Vertical stack layout.

use flowkit_core::{Axis, Item};

use super::StackLayout;

/// A stack that places items top to bottom, each as wide as the stack.
///
/// ```ignore
/// let stack = vstack(items)
///     .inset(EdgeInsets::symmetric(10.0, 16.0))
///     .spacing(5.0);
/// ```
pub fn vstack(items: impl IntoIterator<Item = Item>) -> StackLayout {
    StackLayout::new(Axis::Vertical).with_items(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::CrossAlignment;
    use alloc::{vec, vec::Vec};
    use flowkit_core::{EdgeInsets, FixedContent, Layout, MeasureFn, ProposalSize, Rect, Size};

    fn fixed(width: f32, height: f32) -> Item {
        Item::from_content(FixedContent::new(Size::new(width, height)))
    }

    #[test]
    fn test_vstack_three_fixed_heights() {
        let mut stack = vstack(vec![fixed(50.0, 20.0), fixed(50.0, 30.0), fixed(50.0, 40.0)])
            .inset(EdgeInsets::new(10.0, 10.0, 8.0, 8.0))
            .spacing(5.0);

        let measured = stack.size_that_fits(ProposalSize::new(200.0, None));
        assert_eq!(measured.height, 120.0); // 10 + 20 + 5 + 30 + 5 + 40 + 10
        assert_eq!(measured.width, 200.0);

        let bounds = Rect::from_xywh(0.0, 0.0, 200.0, 120.0);
        let consumed = stack.place(bounds);
        assert_eq!(consumed.height, 120.0);

        let ys: Vec<f32> = stack.items().iter().map(|i| i.frame().y()).collect();
        assert_eq!(ys, vec![10.0, 35.0, 70.0]);

        for item in stack.items() {
            assert_eq!(item.frame().x(), 8.0);
            assert_eq!(item.frame().width(), 184.0); // 200 - 8 - 8
        }
    }

    #[test]
    fn test_vstack_empty_is_inset_only() {
        let stack = vstack(Vec::new()).inset(EdgeInsets::new(4.0, 6.0, 1.0, 2.0));
        let size = stack.size_that_fits(ProposalSize::UNSPECIFIED);
        assert_eq!(size, Size::new(3.0, 10.0));
    }

    #[test]
    fn test_vstack_single_item_ignores_spacing() {
        let stack = vstack(vec![fixed(30.0, 30.0)]).spacing(100.0);
        let size = stack.size_that_fits(ProposalSize::UNSPECIFIED);
        assert_eq!(size, Size::new(30.0, 30.0));
    }

    #[test]
    fn test_vstack_unbounded_width_uses_widest() {
        let stack = vstack(vec![fixed(30.0, 10.0), fixed(80.0, 10.0)])
            .inset(EdgeInsets::symmetric(0.0, 5.0));
        let size = stack.size_that_fits(ProposalSize::UNSPECIFIED);
        assert_eq!(size.width, 90.0);
    }

    #[test]
    fn test_vstack_overflow_is_not_clipped() {
        let mut stack = vstack(vec![fixed(10.0, 300.0), fixed(10.0, 300.0)]);
        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let consumed = stack.place(bounds);
        assert_eq!(consumed.height, 600.0);
        assert_eq!(stack.items()[1].frame().max_y(), 600.0);
    }

    #[test]
    fn test_vstack_width_reaches_children() {
        // Wrapping text: 10pt per char, 40 chars, 20pt lines.
        let text = Item::from_content(MeasureFn::new(|proposal: ProposalSize| {
            let width = proposal.width.unwrap_or(400.0).min(400.0);
            let lines = if width > 0.0 { 400.0 / width } else { 1.0 };
            Size::new(width, lines * 20.0)
        }));
        let stack = vstack(vec![text]).inset(EdgeInsets::symmetric(0.0, 50.0));

        // 300 available, 200 after insets, two lines.
        let size = stack.size_that_fits(ProposalSize::new(300.0, None));
        assert_eq!(size.height, 40.0);
    }

    #[test]
    fn test_vstack_center_alignment() {
        let mut stack = vstack(vec![fixed(40.0, 10.0)]).alignment(CrossAlignment::Center);
        stack.place(Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
        let frame = stack.items()[0].frame();
        assert_eq!(frame.x(), 30.0);
        assert_eq!(frame.width(), 40.0);
    }

    #[test]
    fn test_vstack_bounds_with_offset() {
        let mut stack = vstack(vec![fixed(10.0, 10.0), fixed(10.0, 10.0)]).spacing(2.0);
        stack.place(Rect::from_xywh(100.0, 200.0, 50.0, 50.0));
        assert_eq!(stack.items()[0].frame().origin().x, 100.0);
        assert_eq!(stack.items()[0].frame().y(), 200.0);
        assert_eq!(stack.items()[1].frame().y(), 212.0);
    }
}
