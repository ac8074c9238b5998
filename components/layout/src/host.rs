//! The container side of the layout data flow.
//!
//! A [`LayoutHost`] owns a layout and plays the part a platform view would:
//! it supplies bounds, receives update requests through [`LayoutDelegate`],
//! runs measure and place, and realizes exactly the items visible in the
//! viewport. Items entering the viewport are attached, items leaving it are
//! detached, and every realized item is told its frame.
//!
//! ```ignore
//! let mut host = LayoutHost::new(ListLayout::vertical(), HostConfig::scrolling(Axis::Vertical));
//! host.set_bounds(Rect::from_xywh(0.0, 0.0, 320.0, 480.0));
//! host.update(|list| list.append(rows));
//! host.set_viewport(Rect::from_xywh(0.0, 1200.0, 320.0, 480.0));
//! ```

use alloc::{collections::BTreeMap, rc::Rc, vec::Vec};
use core::cell::Cell;

use flowkit_core::{
    Axis, ItemContent, ItemId, Layout, LayoutDelegate, ProposalSize, Rect, Size,
};

bitflags::bitflags! {
    /// Work a host owes its layout.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Invalidation: u8 {
        /// Frames are stale; run a place pass.
        const NEEDS_UPDATE = 0b01;
        /// The content size may have changed; measure before placing.
        const NEEDS_RESIZE = 0b10;
    }
}

/// When the host runs a pass after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum UpdatePolicy {
    /// Lay out synchronously at the end of every [`LayoutHost::update`].
    #[default]
    Immediate,
    /// Only record the request; the caller runs
    /// [`LayoutHost::layout_if_needed`] (typically once per frame).
    Deferred,
}

/// Host behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HostConfig {
    /// When passes run.
    pub update_policy: UpdatePolicy,
    /// Axis along which the content scrolls, measured unbounded. `None`
    /// confines content to the bounds.
    pub scroll_axis: Option<Axis>,
}

impl HostConfig {
    /// A host that scrolls along `axis`.
    #[must_use]
    pub const fn scrolling(axis: Axis) -> Self {
        Self {
            update_policy: UpdatePolicy::Immediate,
            scroll_axis: Some(axis),
        }
    }

    /// Sets the update policy.
    #[must_use]
    pub const fn update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }
}

/// The delegate handed to the layout: a bounds cell and pending work.
#[derive(Debug, Default)]
pub struct HostSignal {
    bounds: Cell<Rect>,
    pending: Cell<Invalidation>,
}

impl HostSignal {
    /// Work requested since the last pass.
    #[must_use]
    pub fn pending(&self) -> Invalidation {
        self.pending.get()
    }

    fn mark(&self, flags: Invalidation) {
        self.pending.set(self.pending.get() | flags);
    }

    fn take(&self) -> Invalidation {
        self.pending.replace(Invalidation::empty())
    }
}

impl LayoutDelegate for HostSignal {
    fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    fn request_update(&self, resized: bool) {
        let mut flags = Invalidation::NEEDS_UPDATE;
        if resized {
            flags |= Invalidation::NEEDS_RESIZE;
        }
        self.mark(flags);
    }
}

/// Outcome of one [`LayoutHost::layout_if_needed`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPass {
    /// Size of the placed content.
    pub content_size: Size,
    /// Items attached in this pass, in layout order.
    pub appeared: Vec<ItemId>,
    /// Items detached in this pass, in id order.
    pub disappeared: Vec<ItemId>,
}

/// Drives a [`Layout`] the way a platform container would.
#[derive(Debug)]
pub struct LayoutHost<L: Layout> {
    layout: L,
    signal: Rc<HostSignal>,
    config: HostConfig,
    viewport: Option<Rect>,
    realized: BTreeMap<ItemId, Rc<dyn ItemContent>>,
    content_size: Size,
    last_pass: LayoutPass,
}

impl<L: Layout> LayoutHost<L> {
    /// Takes ownership of `layout` and registers as its delegate.
    pub fn new(mut layout: L, config: HostConfig) -> Self {
        let signal = Rc::new(HostSignal::default());
        let delegate = Rc::downgrade(&signal);
        layout.set_delegate(delegate);
        signal.mark(Invalidation::all());

        Self {
            layout,
            signal,
            config,
            viewport: None,
            realized: BTreeMap::new(),
            content_size: Size::zero(),
            last_pass: LayoutPass::default(),
        }
    }

    /// The hosted layout.
    pub const fn layout(&self) -> &L {
        &self.layout
    }

    /// The configuration.
    pub const fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Current bounds.
    pub fn bounds(&self) -> Rect {
        self.signal.bounds()
    }

    /// The visible region: the explicit viewport, or the bounds.
    pub fn viewport(&self) -> Rect {
        self.viewport.unwrap_or_else(|| self.signal.bounds())
    }

    /// Size of the content after the last pass.
    pub const fn content_size(&self) -> Size {
        self.content_size
    }

    /// Work pending for the next pass.
    pub fn pending(&self) -> Invalidation {
        self.signal.pending()
    }

    /// Whether the item with `id` is currently attached.
    pub fn is_realized(&self, id: ItemId) -> bool {
        self.realized.contains_key(&id)
    }

    /// Number of attached items.
    pub fn realized_len(&self) -> usize {
        self.realized.len()
    }

    /// The outcome of the most recent pass.
    pub const fn last_pass(&self) -> &LayoutPass {
        &self.last_pass
    }

    /// Resizes the host.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.signal.bounds() == bounds {
            return;
        }
        self.signal.bounds.set(bounds);
        self.signal.mark(Invalidation::all());
        self.run_if_immediate();
    }

    /// Scrolls: moves the visible region without touching frames.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
        if self.config.update_policy == UpdatePolicy::Immediate {
            self.last_pass = self.layout_if_needed();
        }
    }

    /// Mutates the layout. The layout's own mutators request the work they
    /// need; under [`UpdatePolicy::Immediate`] it runs before returning.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut L) -> R) -> R {
        let result = mutate(&mut self.layout);
        self.run_if_immediate();
        result
    }

    fn run_if_immediate(&mut self) {
        if self.config.update_policy == UpdatePolicy::Immediate && !self.pending().is_empty() {
            self.last_pass = self.layout_if_needed();
        }
    }

    /// Runs whatever work is pending, then reconciles the realized items
    /// with the viewport.
    pub fn layout_if_needed(&mut self) -> LayoutPass {
        let pending = self.signal.take();
        let bounds = self.signal.bounds();

        if pending.contains(Invalidation::NEEDS_RESIZE) {
            let mut proposal = ProposalSize::exact(bounds.size());
            if let Some(axis) = self.config.scroll_axis {
                proposal = ProposalSize::from_axes(axis, None, proposal.along(axis.cross()));
            }
            self.content_size = self.layout.size_that_fits(proposal);
        }

        if !pending.is_empty() {
            let size = match self.config.scroll_axis {
                Some(axis) => Size::from_axes(
                    axis,
                    self.content_size.along(axis),
                    bounds.size().along(axis.cross()),
                ),
                None => bounds.size(),
            };
            self.content_size = self.layout.place(Rect::new(bounds.origin(), size));
        }

        let pass = self.reconcile();
        tracing::debug!(
            appeared = pass.appeared.len(),
            disappeared = pass.disappeared.len(),
            realized = self.realized.len(),
            "host pass"
        );
        pass
    }

    fn reconcile(&mut self) -> LayoutPass {
        let viewport = self.viewport();
        let visible: Vec<(ItemId, Rc<dyn ItemContent>, Rect)> = self
            .layout
            .visible_items(viewport)
            .into_iter()
            .map(|item| (item.id(), item.content().clone(), item.frame()))
            .collect();

        let mut disappeared = Vec::new();
        self.realized.retain(|id, content| {
            let keep = visible.iter().any(|(visible_id, ..)| visible_id == id);
            if !keep {
                content.detach();
                disappeared.push(*id);
            }
            keep
        });

        let mut appeared = Vec::new();
        for (id, content, frame) in visible {
            if !self.realized.contains_key(&id) {
                content.attach();
                appeared.push(id);
                self.realized.insert(id, content.clone());
            }
            content.set_frame(frame);
        }

        LayoutPass {
            content_size: self.content_size,
            appeared,
            disappeared,
        }
    }
}

impl<L: Layout> Drop for LayoutHost<L> {
    fn drop(&mut self) {
        for content in self.realized.values() {
            content.detach();
        }
        tracing::trace!(detached = self.realized.len(), "host dropped");
    }
}
