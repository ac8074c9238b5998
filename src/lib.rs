#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod logging;

#[doc(inline)]
pub use flowkit_layout::*;

/// View recycling.
pub mod reuse {
    pub use flowkit_reuse::*;
}

pub use config::{Config, ConfigError};

pub mod prelude {
    //! Commonly used types in one import.
    //!
    //! ```rust,ignore
    //! use flowkit::prelude::*;
    //!
    //! let mut host = LayoutHost::new(ListLayout::vertical(), HostConfig::scrolling(Axis::Vertical));
    //! ```

    pub use flowkit_layout::{
        Accessory, Alignment, Axis, CompositionLayout, CrossAlignment, EdgeInsets, FixedContent,
        FlowLayout, HostConfig, Item, ItemContent, ItemId, Layout, LayoutDelegate, LayoutHost,
        ListLayout, MeasureFn, Point, ProposalSize, Recipe, Rect, Size, StackLayout,
        UpdatePolicy, VisibilityStrategy, ZStackLayout, hstack, vstack,
    };
    pub use flowkit_reuse::{Reusable, ReuseItem, ReusePolicy, UnloadBehaviour, with_pool};

    pub use crate::{Config, ConfigError};
}
