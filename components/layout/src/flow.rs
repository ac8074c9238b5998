//! A wrapping layout that fills lines along one axis.

use alloc::vec::Vec;

use flowkit_core::{
    Axis, EdgeInsets, Item, Layout, LayoutState, Point, ProposalSize, Rect, Size,
    VisibilityStrategy,
};

/// One line of a flow: the item range and its extents.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Line {
    start: usize,
    end: usize,
    cross: f32,
}

/// Places items back to back along `axis` and starts a new line when the next
/// item would overflow the available main extent.
///
/// Each line is as thick as its thickest item; items sit at the start of
/// their line. An item larger than a whole line gets a line of its own and is
/// clamped to the available extent. With an unbounded main axis everything
/// lands on a single line.
#[derive(Debug)]
pub struct FlowLayout {
    axis: Axis,
    inset: EdgeInsets,
    spacing: f32,
    line_spacing: f32,
    items: Vec<Item>,
    state: LayoutState,
}

impl FlowLayout {
    /// A flow filling lines along `axis`.
    pub fn new(axis: Axis, items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            axis,
            inset: EdgeInsets::ZERO,
            spacing: 0.0,
            line_spacing: 0.0,
            items: items.into_iter().collect(),
            state: LayoutState::new(),
        }
    }

    /// Rows that wrap downwards, like words in a paragraph.
    pub fn rows(items: impl IntoIterator<Item = Item>) -> Self {
        Self::new(Axis::Horizontal, items)
    }

    /// Sets the insets around the content.
    #[must_use]
    pub const fn inset(mut self, inset: EdgeInsets) -> Self {
        self.inset = inset;
        self
    }

    /// Sets the gap between items on the same line.
    #[must_use]
    pub const fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the gap between lines.
    #[must_use]
    pub const fn line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    /// Appends an item and requests an update.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
        self.request_update(true);
    }

    fn measure_items(&self, available: Option<f32>) -> Vec<Size> {
        let proposal = ProposalSize::from_axes(self.axis, available, None);
        self.items
            .iter()
            .map(|item| {
                let size = item.size_that_fits(proposal);
                match available {
                    Some(limit) => Size::from_axes(
                        self.axis,
                        size.along(self.axis).min(limit),
                        size.along(self.axis.cross()),
                    ),
                    None => size,
                }
            })
            .collect()
    }

    fn break_lines(&self, sizes: &[Size], available: Option<f32>) -> Vec<Line> {
        let axis = self.axis;
        let mut lines = Vec::new();
        let mut current: Option<(Line, f32)> = None;

        for (index, size) in sizes.iter().enumerate() {
            let main = size.along(axis);
            let cross = size.along(axis.cross());
            current = Some(match current {
                Some((line, used))
                    if available.is_none_or(|limit| used + self.spacing + main <= limit) =>
                {
                    (
                        Line {
                            end: index + 1,
                            cross: line.cross.max(cross),
                            ..line
                        },
                        used + self.spacing + main,
                    )
                }
                previous => {
                    if let Some((line, _)) = previous {
                        lines.push(line);
                    }
                    (
                        Line {
                            start: index,
                            end: index + 1,
                            cross,
                        },
                        main,
                    )
                }
            });
        }
        if let Some((line, _)) = current {
            lines.push(line);
        }
        lines
    }

    fn content_cross(&self, lines: &[Line]) -> f32 {
        let gaps = crate::stack::total_spacing(lines.len(), self.line_spacing);
        lines.iter().map(|line| line.cross).sum::<f32>() + gaps
    }

    fn widest_line(&self, lines: &[Line], sizes: &[Size]) -> f32 {
        lines
            .iter()
            .map(|line| {
                let count = line.end - line.start;
                sizes[line.start..line.end]
                    .iter()
                    .map(|size| size.along(self.axis))
                    .sum::<f32>()
                    + crate::stack::total_spacing(count, self.spacing)
            })
            .fold(0.0, f32::max)
    }
}

impl Layout for FlowLayout {
    fn size_that_fits(&self, proposal: ProposalSize) -> Size {
        let proposal = proposal.sanitized();
        let axis = self.axis;
        let available = proposal
            .along(axis)
            .map(|extent| (extent - self.inset.along(axis)).max(0.0));

        let sizes = self.measure_items(available);
        let lines = self.break_lines(&sizes, available);
        let main = available.unwrap_or_else(|| self.widest_line(&lines, &sizes));

        let size = Size::from_axes(
            axis,
            main + self.inset.along(axis),
            self.content_cross(&lines) + self.inset.along(axis.cross()),
        );
        self.state.record_measure(proposal, size);
        size
    }

    fn place(&mut self, bounds: Rect) -> Size {
        let axis = self.axis;
        let cross = axis.cross();
        let bounds = Rect::new(bounds.origin(), bounds.size().sanitized());
        let available = (bounds.size().along(axis) - self.inset.along(axis)).max(0.0);

        let sizes = self.measure_items(Some(available));
        let lines = self.break_lines(&sizes, Some(available));

        let main_origin = bounds.origin().along(axis) + self.inset.start(axis);
        let mut line_origin = bounds.origin().along(cross) + self.inset.start(cross);
        for line in &lines {
            let mut cursor = main_origin;
            for index in line.start..line.end {
                let size = sizes[index];
                self.items[index].set_frame(Rect::new(
                    Point::from_axes(axis, cursor, line_origin),
                    size,
                ));
                cursor += size.along(axis) + self.spacing;
            }
            line_origin += line.cross + self.line_spacing;
        }

        tracing::debug!(lines = lines.len(), items = self.items.len(), "flow placed");
        Size::from_axes(
            axis,
            bounds.size().along(axis),
            self.content_cross(&lines) + self.inset.along(cross),
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

    fn visibility(&self) -> VisibilityStrategy {
        VisibilityStrategy::Exhaustive
    }
}
