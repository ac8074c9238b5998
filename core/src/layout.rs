//! The measure/place protocol.
//!
//! Every layout in the workspace follows the same two-pass contract:
//!
//! 1. **Measure** ([`Layout::size_that_fits`]): given the space a parent can
//!    offer, report the size the content wants. This pass never touches item
//!    frames.
//! 2. **Place** ([`Layout::place`]): given concrete bounds, write a frame to
//!    every item and report the size actually consumed.
//!
//! A third query, [`Layout::visible_items`], answers which placed items a
//! viewport shows. Containers realize native content only for those.

use core::fmt::Debug;

use alloc::{rc::Weak, vec::Vec};

use crate::{
    Item, ProposalSize, Rect, Size,
    delegate::{LayoutDelegate, LayoutState},
    visibility::{self, VisibilityStrategy},
};

// ============================================================================
// ItemContent - what an Item wraps
// ============================================================================

/// The content side of an [`Item`]: something that can be measured, framed
/// and attached.
///
/// Content is shared between the layout and application code, so every hook
/// takes `&self`; implementations keep mutable state in cells.
pub trait ItemContent: Debug {
    /// Query the content's size for a given proposal.
    ///
    /// This may be called several times per pass with different proposals,
    /// and must not depend on the content's current frame.
    fn size_that_fits(&self, proposal: ProposalSize) -> Size;

    /// Receives the frame computed by the owning layout.
    fn set_frame(&self, _frame: Rect) {}

    /// The item entered the visible range; realize native resources.
    fn attach(&self) {}

    /// The item left the visible range; release native resources.
    fn detach(&self) {}
}

// ============================================================================
// Layout Trait
// ============================================================================

/// A measurement and placement strategy over an ordered set of [`Item`]s.
///
/// # Contract
///
/// - `size_that_fits` is a pure function of the proposal and the current
///   items. It may fill size caches but never writes frames.
/// - `place` is the only operation that writes frames. Placing twice with
///   the same bounds and items yields identical frames, and measuring with
///   `bounds.size()` afterwards returns what `place` reported.
/// - Malformed sizes clamp to zero. There are no recoverable errors.
pub trait Layout: Debug {
    /// Calculate the size this layout wants given a proposal.
    fn size_that_fits(&self, proposal: ProposalSize) -> Size;

    /// Assign a frame to every item within `bounds` and return the size
    /// consumed. The result may be smaller than `bounds` for fit-content
    /// strategies, or larger when content overflows.
    fn place(&mut self, bounds: Rect) -> Size;

    /// Items in traversal (and z) order.
    fn items(&self) -> &[Item];

    /// Shared bookkeeping: delegate and last measured size.
    fn state(&self) -> &LayoutState;

    /// Mutable access to the shared bookkeeping.
    fn state_mut(&mut self) -> &mut LayoutState;

    /// How [`visible_items`](Self::visible_items) may scan this layout's frames.
    ///
    /// The default is an exhaustive scan, which is always correct. Layouts
    /// whose frames are sorted and non-overlapping along an axis should
    /// return [`VisibilityStrategy::SortedRun`].
    fn visibility(&self) -> VisibilityStrategy {
        VisibilityStrategy::Exhaustive
    }

    /// Items whose frame is visible in `viewport`, in traversal order.
    ///
    /// Meaningful only after [`place`](Self::place) ran for the current
    /// bounds; before that it reports against zeroed frames.
    fn visible_items(&self, viewport: Rect) -> Vec<&Item> {
        visibility::visible_items(self.items(), &viewport, self.visibility())
    }

    /// Installs the delegate notified by [`request_update`](Self::request_update).
    fn set_delegate(&mut self, delegate: Weak<dyn LayoutDelegate>) {
        self.state_mut().set_delegate(delegate);
    }

    /// Asks the delegate to re-run layout, optionally because the measured
    /// size may have changed.
    fn request_update(&self, resized: bool) {
        self.state().request_update(resized);
    }

    /// The bounds of the container hosting this layout, if one is attached.
    fn parent_bounds(&self) -> Option<Rect> {
        self.state().parent_bounds()
    }
}
