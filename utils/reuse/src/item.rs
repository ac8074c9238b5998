//! Owner-side handles that recycle content through this thread's pool.

use core::{fmt, marker::PhantomData};

use crate::pool::try_with_pool;

/// When a [`ReuseItem`] gives its content back to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnloadBehaviour {
    /// Release as soon as the item leaves the visible area. Maximizes reuse
    /// but reconfigures on every reappearance.
    #[default]
    WhenDisappear,
    /// Keep the content until the item itself is destroyed. For content that
    /// is expensive to configure.
    WhenDestroy,
}

/// A kind of recyclable content and how to build, configure and reset it.
///
/// ```ignore
/// struct Avatar;
///
/// impl Reusable for Avatar {
///     const IDENTIFIER: &'static str = "Avatar";
///     type Content = ImageView;
///     type Owner = Profile;
///
///     fn create(_: &Profile) -> ImageView { ImageView::new() }
///     fn configure(view: &mut ImageView, profile: &Profile) { view.set_url(&profile.avatar) }
///     fn cleanup(view: &mut ImageView) { view.cancel_load() }
/// }
/// ```
pub trait Reusable: 'static {
    /// Pool bucket shared by every owner of this kind.
    const IDENTIFIER: &'static str;
    /// The recycled instance.
    type Content: 'static;
    /// Whatever the content is configured from.
    type Owner: ?Sized;

    /// Builds a fresh instance on a pool miss.
    fn create(owner: &Self::Owner) -> Self::Content;

    /// Applies `owner`'s state to an instance about to be shown.
    fn configure(content: &mut Self::Content, owner: &Self::Owner);

    /// Clears transient state before the instance goes back to the pool.
    fn cleanup(_content: &mut Self::Content) {}

    /// When the content is released.
    fn unload_behaviour() -> UnloadBehaviour {
        UnloadBehaviour::WhenDisappear
    }
}

/// Holds at most one checked-out instance of `R::Content` for one owner.
pub struct ReuseItem<R: Reusable> {
    content: Option<R::Content>,
    _kind: PhantomData<R>,
}

impl<R: Reusable> fmt::Debug for ReuseItem<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReuseItem")
            .field("identifier", &R::IDENTIFIER)
            .field("loaded", &self.content.is_some())
            .finish()
    }
}

impl<R: Reusable> Default for ReuseItem<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reusable> ReuseItem<R> {
    /// A handle with no content yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            content: None,
            _kind: PhantomData,
        }
    }

    /// Whether content is currently held.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.content.is_some()
    }

    /// The held content.
    #[must_use]
    pub const fn content(&self) -> Option<&R::Content> {
        self.content.as_ref()
    }

    /// The held content, mutably.
    pub const fn content_mut(&mut self) -> Option<&mut R::Content> {
        self.content.as_mut()
    }

    /// The owner became visible: check out content if none is held, then
    /// configure it for `owner`.
    pub fn appear(&mut self, owner: &R::Owner) -> &mut R::Content {
        let content = match self.content.take() {
            Some(content) => content,
            None => try_with_pool(|pool| pool.take::<R::Content>(R::IDENTIFIER))
                .flatten()
                .unwrap_or_else(|| {
                    tracing::trace!(identifier = R::IDENTIFIER, "creating reusable content");
                    R::create(owner)
                }),
        };
        let content = self.content.insert(content);
        R::configure(content, owner);
        content
    }

    /// The owner left the visible area. Releases the content under
    /// [`UnloadBehaviour::WhenDisappear`].
    pub fn disappear(&mut self) {
        if R::unload_behaviour() == UnloadBehaviour::WhenDisappear {
            self.release();
        }
    }

    /// The owner is gone. Always releases the content.
    pub fn destroy(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(mut content) = self.content.take() else {
            return;
        };
        R::cleanup(&mut content);
        if try_with_pool(|pool| pool.put(R::IDENTIFIER, content)).is_none() {
            tracing::debug!(identifier = R::IDENTIFIER, "pool unavailable, dropping content");
        }
    }
}

impl<R: Reusable> Drop for ReuseItem<R> {
    fn drop(&mut self) {
        self.release();
    }
}
