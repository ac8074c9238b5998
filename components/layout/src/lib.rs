#![no_std]
//! Layout algorithms for `flowkit`.
//!
//! Every container here implements the two-pass [`Layout`] protocol from
//! `flowkit-core`: a parent first asks how large the layout would like to be
//! for a [`ProposalSize`], then hands it final bounds to place its items in.
//!
//! - [`stack`]: vertical and horizontal stacks plus an overlapping z-stack,
//! - [`composition`]: small fixed cells built from nestable [`Recipe`]s,
//! - [`list`]: a long, mutable list with incremental placement and
//!   virtualized visibility,
//! - [`flow`]: lines that wrap when full,
//! - [`host`]: a container that drives any of the above and realizes only the
//!   visible items.
//!
//! # Example
//!
//! ```rust,ignore
//! use flowkit_layout::{EdgeInsets, Item, Layout, ProposalSize, Rect, vstack};
//!
//! let mut column = vstack([title, body, footer])
//!     .inset(EdgeInsets::symmetric(10.0, 8.0))
//!     .spacing(5.0);
//! let size = column.size_that_fits(ProposalSize::new(200.0, None));
//! column.place(Rect::from_size(size));
//! ```

extern crate alloc;

pub use flowkit_core::*;

pub mod composition;
pub mod flow;
pub mod host;
pub mod list;
pub mod stack;

pub use composition::{Accessory, CompositionLayout, Recipe, Slot};
pub use flow::FlowLayout;
pub use host::{HostConfig, HostSignal, Invalidation, LayoutHost, LayoutPass, UpdatePolicy};
pub use list::ListLayout;
pub use stack::{Alignment, CrossAlignment, StackLayout, ZStackLayout, hstack, vstack};
