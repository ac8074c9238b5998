//! The inversion-of-control seam between a layout and the container hosting it.
//!
//! A layout never owns its container. It holds a [`Weak`] reference to a
//! [`LayoutDelegate`] and calls [`LayoutDelegate::request_update`] whenever
//! its items change; the delegate decides whether to lay out immediately or
//! on the next pass.

use core::cell::Cell;

use alloc::rc::Weak;

use crate::{ProposalSize, Rect, Size};

/// Implemented by whatever hosts a layout (a scroll view, a screen, a test
/// harness).
pub trait LayoutDelegate {
    /// Current bounds of the hosting container.
    fn bounds(&self) -> Rect;

    /// The layout's items changed. `resized` is true when the measured size
    /// may have changed as well, not just the arrangement.
    fn request_update(&self, resized: bool);
}

/// Bookkeeping every layout embeds: the delegate back-reference and the last
/// measured size.
#[derive(Debug, Default)]
pub struct LayoutState {
    delegate: Option<Weak<dyn LayoutDelegate>>,
    last_measured: Cell<Option<(ProposalSize, Size)>>,
}

impl LayoutState {
    /// Creates state with no delegate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the delegate.
    pub fn set_delegate(&mut self, delegate: Weak<dyn LayoutDelegate>) {
        self.delegate = Some(delegate);
    }

    /// Drops the delegate back-reference.
    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// Whether a live delegate is attached.
    #[must_use]
    pub fn has_delegate(&self) -> bool {
        self.delegate.as_ref().is_some_and(|d| d.strong_count() > 0)
    }

    /// Bounds reported by the delegate, if it is still alive.
    #[must_use]
    pub fn parent_bounds(&self) -> Option<Rect> {
        self.delegate
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|delegate| delegate.bounds())
    }

    /// Forgets the last measurement and notifies the delegate.
    pub fn request_update(&self, resized: bool) {
        self.last_measured.set(None);
        if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
            tracing::trace!(resized, "layout requested update");
            delegate.request_update(resized);
        }
    }

    /// Records the outcome of a measure pass.
    pub fn record_measure(&self, proposal: ProposalSize, size: Size) {
        self.last_measured.set(Some((proposal, size)));
    }

    /// The most recent measure pass, if nothing invalidated it since.
    #[must_use]
    pub fn last_measured(&self) -> Option<(ProposalSize, Size)> {
        self.last_measured.get()
    }
}
