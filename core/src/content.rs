//! Ready-made [`ItemContent`] implementations.
//!
//! Real content (images, text, buttons) lives in backends. These cover the
//! cases the engine itself needs: fixed-size placeholders and closures.

use core::{cell::Cell, fmt};

use crate::{ItemContent, ProposalSize, Rect, Size};

/// Content with a fixed intrinsic size that records what the layout did
/// with it.
#[derive(Debug, Default)]
pub struct FixedContent {
    size: Cell<Size>,
    frame: Cell<Rect>,
    attached: Cell<bool>,
}

impl FixedContent {
    /// Content that always measures as `size`.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            size: Cell::new(size),
            frame: Cell::new(Rect::new(crate::Point::zero(), Size::zero())),
            attached: Cell::new(false),
        }
    }

    /// Changes the intrinsic size. The owning item must be invalidated.
    pub fn set_size(&self, size: Size) {
        self.size.set(size);
    }

    /// The last frame received from a layout host.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame.get()
    }

    /// Whether the content is currently attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

impl ItemContent for FixedContent {
    fn size_that_fits(&self, _proposal: ProposalSize) -> Size {
        self.size.get()
    }

    fn set_frame(&self, frame: Rect) {
        self.frame.set(frame);
    }

    fn attach(&self) {
        self.attached.set(true);
    }

    fn detach(&self) {
        self.attached.set(false);
    }
}

/// Content measured by a closure, for sizes that depend on the proposal
/// (wrapping text, aspect-ratio images).
pub struct MeasureFn<F> {
    measure: F,
}

impl<F> MeasureFn<F>
where
    F: Fn(ProposalSize) -> Size,
{
    /// Wraps the measuring closure.
    pub const fn new(measure: F) -> Self {
        Self { measure }
    }
}

impl<F> fmt::Debug for MeasureFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasureFn").finish_non_exhaustive()
    }
}

impl<F> ItemContent for MeasureFn<F>
where
    F: Fn(ProposalSize) -> Size,
{
    fn size_that_fits(&self, proposal: ProposalSize) -> Size {
        (self.measure)(proposal)
    }
}
