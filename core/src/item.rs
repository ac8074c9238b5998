//! Items: the leaf unit of a layout tree.

use core::{
    cell::Cell,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use alloc::rc::Rc;

use crate::{ItemContent, ProposalSize, Rect, Size};

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of an [`Item`], used to delete items and track which ones
/// a container has realized.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    /// Allocates a fresh, process-unique id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

#[derive(Clone, Copy, Debug)]
struct Measured {
    proposal: ProposalSize,
    size: Size,
}

/// A positioned, sized handle wrapping one piece of content.
///
/// The frame is zero until the owning layout's place pass has run, and is
/// stale after any change to bounds or siblings until the next pass.
#[derive(Debug)]
pub struct Item {
    id: ItemId,
    frame: Rect,
    content: Rc<dyn ItemContent>,
    measured: Cell<Option<Measured>>,
}

impl Item {
    /// Wraps shared content.
    #[must_use]
    pub fn new(content: Rc<dyn ItemContent>) -> Self {
        Self {
            id: ItemId::next(),
            frame: Rect::default(),
            content,
            measured: Cell::new(None),
        }
    }

    /// Wraps content owned only by this item.
    #[must_use]
    pub fn from_content(content: impl ItemContent + 'static) -> Self {
        Self::new(Rc::new(content))
    }

    /// This item's identity.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// The frame written by the last place pass.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// The wrapped content.
    #[must_use]
    pub const fn content(&self) -> &Rc<dyn ItemContent> {
        &self.content
    }

    /// Measures the content, reusing the cached answer when the proposal is
    /// unchanged since the last call. The result is always sanitized.
    #[must_use]
    pub fn size_that_fits(&self, proposal: ProposalSize) -> Size {
        if let Some(measured) = self.measured.get()
            && measured.proposal == proposal
        {
            return measured.size;
        }
        let size = self.content.size_that_fits(proposal).sanitized();
        self.measured.set(Some(Measured { proposal, size }));
        size
    }

    /// Drops the cached measurement. Call when the content's intrinsic size
    /// changed.
    pub fn invalidate(&self) {
        self.measured.set(None);
    }

    /// Whether a measurement is cached.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.measured.get().is_some()
    }

    /// Writes the frame. Only layouts call this, from their place pass.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FixedContent;

    #[test]
    fn test_ids_are_unique() {
        let a = ItemId::next();
        let b = ItemId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn test_measurement_is_cached_per_proposal() {
        let content = Rc::new(FixedContent::new(Size::new(40.0, 20.0)));
        let item = Item::new(content.clone());

        let proposal = ProposalSize::new(100.0, None);
        assert_eq!(item.size_that_fits(proposal), Size::new(40.0, 20.0));
        assert!(item.is_measured());

        content.set_size(Size::new(10.0, 10.0));
        // Still cached.
        assert_eq!(item.size_that_fits(proposal), Size::new(40.0, 20.0));

        item.invalidate();
        assert_eq!(item.size_that_fits(proposal), Size::new(10.0, 10.0));

        content.set_size(Size::new(1.0, 1.0));
        // A different proposal always asks the content.
        assert_eq!(
            item.size_that_fits(ProposalSize::UNSPECIFIED),
            Size::new(1.0, 1.0)
        );
    }

    #[test]
    fn test_negative_measurement_clamps() {
        let item = Item::from_content(FixedContent::new(Size::new(-3.0, f32::NAN)));
        assert_eq!(item.size_that_fits(ProposalSize::UNSPECIFIED), Size::zero());
    }

    #[test]
    fn test_frame_starts_zeroed() {
        let item = Item::from_content(FixedContent::new(Size::new(5.0, 5.0)));
        assert_eq!(item.frame(), Rect::default());
    }
}
