//! View recycling for `flowkit`.
//!
//! Native content wrappers (image views, text views, buttons) are expensive
//! to build. When an item scrolls out of view its content goes back to a
//! keyed pool, and the next item of the same kind to appear takes it instead
//! of building a new one.
//!
//! - [`ReusePool`] is the pool itself: a LIFO stack of idle instances per
//!   [`ReuseKey`]. The most recently released instance is handed out first.
//! - [`with_pool`] reaches the pool shared by everything on this thread.
//! - [`Reusable`] and [`ReuseItem`] package the checkout/check-in protocol
//!   for one kind of content, with a per-kind [`UnloadBehaviour`].
//!
//! The pool never evicts by default. Set
//! [`ReusePolicy::capacity_per_key`] to bound it.

pub mod item;
pub mod pool;

pub use item::{Reusable, ReuseItem, UnloadBehaviour};
pub use pool::{
    ReuseKey, ReusePolicy, ReusePool, configure_global, try_with_pool, with_pool,
};
