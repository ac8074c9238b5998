#![no_std]
//! Core of the `flowkit` layout engine.
//!
//! This crate defines the vocabulary every layout speaks:
//!
//! - geometry ([`Point`], [`Size`], [`Rect`], [`EdgeInsets`], [`Axis`]) and the
//!   [`ProposalSize`] a parent offers during measurement,
//! - [`Item`], the positioned handle around shared [`ItemContent`],
//! - the two-pass [`Layout`] trait and the [`LayoutDelegate`] a container
//!   implements to receive invalidations,
//! - the [`visibility`] queries behind virtualization.
//!
//! Concrete algorithms live in `flowkit-layout`.
//!
//! # Logical Pixels (Points)
//!
//! All values are logical points, the unit design tools use. Native backends
//! convert to physical pixels.

extern crate alloc;

pub mod content;
pub mod delegate;
pub mod geometry;
pub mod item;
pub mod layout;
pub mod visibility;

pub use content::{FixedContent, MeasureFn};
pub use delegate::{LayoutDelegate, LayoutState};
pub use geometry::{Axis, EdgeInsets, Point, ProposalSize, Rect, Size, clamp_dimension};
pub use item::{Item, ItemId};
pub use layout::{ItemContent, Layout};
pub use visibility::VisibilityStrategy;
