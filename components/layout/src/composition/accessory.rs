//! Leading / center / trailing accessory arrangement.

use alloc::boxed::Box;

use flowkit_core::{Axis, Item, Point, ProposalSize, Rect, Size};

use super::Recipe;

/// Three slots along an axis: an optional leading accessory, a center, and
/// an optional trailing accessory. Every slot fills the cross axis.
///
/// With `filling` set, the accessories keep their natural main-axis size and
/// the center takes whatever remains; the trailing accessory stays pinned to
/// the trailing edge. Without it, every slot keeps its natural size while
/// they fit, and on overflow all of them shrink in proportion to their
/// natural sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessory {
    axis: Axis,
    leading: Option<Box<Recipe>>,
    center: Box<Recipe>,
    trailing: Option<Box<Recipe>>,
    spacing: f32,
    filling: bool,
}

/// Main-axis extents resolved for one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extents {
    leading: f32,
    center: f32,
    trailing: f32,
    cross: f32,
}

impl Accessory {
    /// A horizontal accessory around `center`, filling by default.
    #[must_use]
    pub fn new(center: Recipe) -> Self {
        Self {
            axis: Axis::Horizontal,
            leading: None,
            center: Box::new(center),
            trailing: None,
            spacing: 0.0,
            filling: true,
        }
    }

    /// Sets the main axis.
    #[must_use]
    pub const fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Sets the leading accessory.
    #[must_use]
    pub fn leading(mut self, leading: Recipe) -> Self {
        self.leading = Some(Box::new(leading));
        self
    }

    /// Sets the trailing accessory.
    #[must_use]
    pub fn trailing(mut self, trailing: Recipe) -> Self {
        self.trailing = Some(Box::new(trailing));
        self
    }

    /// Sets the gap between adjacent present slots.
    #[must_use]
    pub const fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Whether the center takes all remaining space.
    #[must_use]
    pub const fn filling(mut self, filling: bool) -> Self {
        self.filling = filling;
        self
    }

    fn gaps(&self) -> f32 {
        let present = usize::from(self.leading.is_some())
            + usize::from(!self.center.is_empty())
            + usize::from(self.trailing.is_some());
        crate::stack::total_spacing(present, self.spacing)
    }

    fn resolve(&self, items: &[Item], proposal: ProposalSize) -> Extents {
        let axis = self.axis;
        let cross = axis.cross();
        let cross_proposal = proposal.along(cross);
        let natural = ProposalSize::from_axes(axis, None, cross_proposal);

        let measure_opt = |recipe: &Option<Box<Recipe>>| {
            recipe
                .as_ref()
                .map_or(Size::zero(), |r| r.measure(items, natural))
        };
        let leading = measure_opt(&self.leading);
        let trailing = measure_opt(&self.trailing);
        let gaps = self.gaps();

        let Some(available) = proposal.along(axis) else {
            let center = self.center.measure(items, natural);
            return Extents {
                leading: leading.along(axis),
                center: center.along(axis),
                trailing: trailing.along(axis),
                cross: leading
                    .along(cross)
                    .max(center.along(cross))
                    .max(trailing.along(cross)),
            };
        };

        let (lead_main, center_main, trail_main) = if self.filling {
            let remaining =
                (available - leading.along(axis) - trailing.along(axis) - gaps).max(0.0);
            (leading.along(axis), remaining, trailing.along(axis))
        } else {
            let center = self.center.measure(items, natural).along(axis);
            let natural_sum = leading.along(axis) + center + trailing.along(axis);
            let share = (available - gaps).max(0.0);
            if natural_sum > 0.0 {
                // Shrink on overflow, never stretch.
                let scale = (share / natural_sum).min(1.0);
                (
                    leading.along(axis) * scale,
                    center * scale,
                    trailing.along(axis) * scale,
                )
            } else {
                (0.0, 0.0, 0.0)
            }
        };

        let center_size = self.center.measure(
            items,
            ProposalSize::from_axes(axis, Some(center_main), cross_proposal),
        );

        Extents {
            leading: lead_main,
            center: center_main,
            trailing: trail_main,
            cross: leading
                .along(cross)
                .max(center_size.along(cross))
                .max(trailing.along(cross)),
        }
    }

    /// Size this accessory wants for `proposal`.
    #[must_use]
    pub fn measure(&self, items: &[Item], proposal: ProposalSize) -> Size {
        let extents = self.resolve(items, proposal);
        let main = extents.leading + extents.center + extents.trailing + self.gaps();
        let cross = proposal.along(self.axis.cross()).unwrap_or(extents.cross);
        Size::from_axes(self.axis, main, cross)
    }

    /// Places the three slots within `bounds`.
    pub fn place(&self, items: &mut [Item], bounds: Rect) {
        let axis = self.axis;
        let cross = axis.cross();
        let extents = self.resolve(items, ProposalSize::exact(bounds.size()));
        let cross_origin = bounds.origin().along(cross);
        let cross_extent = bounds.size().along(cross);
        let slot = |main_origin: f32, main: f32| {
            Rect::new(
                Point::from_axes(axis, main_origin, cross_origin),
                Size::from_axes(axis, main, cross_extent),
            )
        };

        let mut cursor = bounds.origin().along(axis);
        if let Some(leading) = &self.leading {
            leading.place(items, slot(cursor, extents.leading));
            cursor += extents.leading + self.spacing;
        }
        if !self.center.is_empty() {
            self.center.place(items, slot(cursor, extents.center));
            cursor += extents.center + self.spacing;
        }
        if let Some(trailing) = &self.trailing {
            let origin = if self.filling {
                cursor.max(bounds.max_along(axis) - extents.trailing)
            } else {
                cursor
            };
            trailing.place(items, slot(origin, extents.trailing));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use flowkit_core::{FixedContent, MeasureFn};

    fn fixed(width: f32, height: f32) -> Item {
        Item::from_content(FixedContent::new(Size::new(width, height)))
    }

    fn text(natural_width: f32) -> Item {
        Item::from_content(MeasureFn::new(move |proposal: ProposalSize| {
            Size::new(proposal.width.unwrap_or(natural_width), 18.0)
        }))
    }

    #[test]
    fn test_filling_center_takes_remaining_space() {
        let mut items: Vec<Item> = Vec::from([fixed(40.0, 40.0), text(50.0), fixed(40.0, 40.0)]);
        let accessory = Accessory::new(Recipe::view(1))
            .leading(Recipe::view(0))
            .trailing(Recipe::view(2))
            .filling(true);

        accessory.place(&mut items, Rect::from_xywh(0.0, 0.0, 300.0, 44.0));

        assert_eq!(items[0].frame(), Rect::from_xywh(0.0, 0.0, 40.0, 44.0));
        assert_eq!(items[1].frame(), Rect::from_xywh(40.0, 0.0, 220.0, 44.0));
        assert_eq!(items[2].frame(), Rect::from_xywh(260.0, 0.0, 40.0, 44.0));
    }

    #[test]
    fn test_filling_respects_spacing() {
        let mut items: Vec<Item> = Vec::from([fixed(40.0, 40.0), text(50.0), fixed(40.0, 40.0)]);
        let accessory = Accessory::new(Recipe::view(1))
            .leading(Recipe::view(0))
            .trailing(Recipe::view(2))
            .spacing(10.0);

        accessory.place(&mut items, Rect::from_xywh(0.0, 0.0, 300.0, 44.0));
        assert_eq!(items[1].frame().x(), 50.0);
        assert_eq!(items[1].frame().width(), 200.0);
        assert_eq!(items[2].frame().max_x(), 300.0);
    }

    #[test]
    fn test_proportional_sharing() {
        let mut items: Vec<Item> = Vec::from([fixed(20.0, 10.0), text(60.0), fixed(20.0, 10.0)]);
        let accessory = Accessory::new(Recipe::view(1))
            .leading(Recipe::view(0))
            .trailing(Recipe::view(2))
            .filling(false);

        // Natural 20 + 60 + 20 = 100 shares 50: everything halves.
        accessory.place(&mut items, Rect::from_xywh(0.0, 0.0, 50.0, 10.0));
        assert_eq!(items[0].frame().width(), 10.0);
        assert_eq!(items[1].frame().width(), 30.0);
        assert_eq!(items[1].frame().x(), 10.0);
        assert_eq!(items[2].frame().x(), 40.0);
    }

    #[test]
    fn test_non_filling_keeps_natural_sizes_when_they_fit() {
        let mut items: Vec<Item> = Vec::from([fixed(20.0, 10.0), text(60.0), fixed(20.0, 10.0)]);
        let accessory = Accessory::new(Recipe::view(1))
            .leading(Recipe::view(0))
            .trailing(Recipe::view(2))
            .filling(false);

        let bounds = Rect::from_xywh(0.0, 0.0, 300.0, 10.0);
        assert_eq!(
            accessory.measure(&items, ProposalSize::exact(bounds.size())),
            Size::new(100.0, 10.0)
        );

        accessory.place(&mut items, bounds);
        let widths: Vec<f32> = items.iter().map(|item| item.frame().width()).collect();
        assert_eq!(widths, Vec::from([20.0, 60.0, 20.0]));
        assert_eq!(items[1].frame().x(), 20.0);
        assert_eq!(items[2].frame().x(), 80.0);
    }

    #[test]
    fn test_filling_pins_trailing_without_center() {
        let mut items: Vec<Item> = Vec::from([fixed(40.0, 40.0), fixed(30.0, 40.0)]);
        let accessory = Accessory::new(Recipe::Empty)
            .leading(Recipe::view(0))
            .trailing(Recipe::view(1))
            .filling(true);

        accessory.place(&mut items, Rect::from_xywh(10.0, 0.0, 300.0, 44.0));
        assert_eq!(items[0].frame(), Rect::from_xywh(10.0, 0.0, 40.0, 44.0));
        assert_eq!(items[1].frame(), Rect::from_xywh(280.0, 0.0, 30.0, 44.0));
    }

    #[test]
    fn test_unbounded_measure_is_natural() {
        let items: Vec<Item> = Vec::from([fixed(40.0, 40.0), text(50.0), fixed(30.0, 20.0)]);
        let accessory = Accessory::new(Recipe::view(1))
            .leading(Recipe::view(0))
            .trailing(Recipe::view(2))
            .spacing(5.0);

        let size = accessory.measure(&items, ProposalSize::UNSPECIFIED);
        assert_eq!(size, Size::new(130.0, 40.0));
    }

    #[test]
    fn test_vertical_accessory() {
        let mut items: Vec<Item> = Vec::from([fixed(10.0, 20.0), fixed(10.0, 5.0)]);
        let accessory = Accessory::new(Recipe::view(1))
            .axis(Axis::Vertical)
            .leading(Recipe::view(0));

        accessory.place(&mut items, Rect::from_xywh(0.0, 0.0, 60.0, 100.0));
        assert_eq!(items[0].frame(), Rect::from_xywh(0.0, 0.0, 60.0, 20.0));
        assert_eq!(items[1].frame(), Rect::from_xywh(0.0, 20.0, 60.0, 80.0));
    }
}
