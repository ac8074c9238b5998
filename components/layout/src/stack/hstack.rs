//! Horizontal stack layout.

use flowkit_core::{Axis, Item};

use super::StackLayout;

/// A stack that places items left to right, each as tall as the stack.
pub fn hstack(items: impl IntoIterator<Item = Item>) -> StackLayout {
    StackLayout::new(Axis::Horizontal).with_items(items)
}
