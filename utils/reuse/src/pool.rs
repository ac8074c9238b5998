//! The keyed instance pool.

use std::{
    any::{Any, TypeId, type_name},
    borrow::Cow,
    cell::RefCell,
    collections::HashMap,
    fmt,
};

/// Identifies one kind of recyclable content.
///
/// Two instances share a pool bucket only if both the identifier and the
/// Rust type match, so a checkout can never hand back the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReuseKey {
    identifier: Cow<'static, str>,
    type_id: TypeId,
}

impl ReuseKey {
    /// The key for instances of `T` registered as `identifier`.
    pub fn of<T: 'static>(identifier: impl Into<Cow<'static, str>>) -> Self {
        Self {
            identifier: identifier.into(),
            type_id: TypeId::of::<T>(),
        }
    }

    /// The content-kind identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The Rust type of pooled instances.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }
}

/// Limits applied to a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ReusePolicy {
    /// Idle instances kept per key. `None` keeps every released instance.
    pub capacity_per_key: Option<usize>,
}

impl ReusePolicy {
    /// Never drops released instances.
    pub const UNBOUNDED: Self = Self {
        capacity_per_key: None,
    };

    /// Keeps at most `capacity` idle instances per key.
    #[must_use]
    pub const fn bounded(capacity: usize) -> Self {
        Self {
            capacity_per_key: Some(capacity),
        }
    }
}

type Bucket = Vec<Box<dyn Any>>;

/// A keyed LIFO cache of idle content instances.
///
/// An instance is either checked out, owned by exactly one caller, or idle
/// in the pool; it moves by value between the two, so it can never be both.
#[derive(Default)]
pub struct ReusePool {
    policy: ReusePolicy,
    /// Buckets by instance type, then identifier. Lookups borrow the
    /// identifier.
    idle: HashMap<TypeId, HashMap<Cow<'static, str>, Bucket>>,
}

impl fmt::Debug for ReusePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for buckets in self.idle.values() {
            for (identifier, instances) in buckets {
                map.entry(identifier, &instances.len());
            }
        }
        map.finish()
    }
}

impl ReusePool {
    /// An empty, unbounded pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty pool with `policy`.
    #[must_use]
    pub fn with_policy(policy: ReusePolicy) -> Self {
        Self {
            policy,
            idle: HashMap::new(),
        }
    }

    /// The active policy.
    #[must_use]
    pub const fn policy(&self) -> ReusePolicy {
        self.policy
    }

    /// Replaces the policy, dropping idle instances above the new capacity.
    pub fn set_policy(&mut self, policy: ReusePolicy) {
        self.policy = policy;
        if let Some(capacity) = policy.capacity_per_key {
            for instances in self.idle.values_mut().flat_map(HashMap::values_mut) {
                instances.truncate(capacity);
            }
        }
    }

    /// Pops the most recently released `T` under `identifier`, if any.
    pub fn take<T: 'static>(&mut self, identifier: &str) -> Option<T> {
        let boxed = self
            .idle
            .get_mut(&TypeId::of::<T>())?
            .get_mut(identifier)?
            .pop()?;
        // Buckets are keyed by `TypeId`, so the downcast always succeeds.
        let instance = boxed.downcast::<T>().ok()?;
        tracing::trace!(identifier, ty = type_name::<T>(), "reuse hit");
        Some(*instance)
    }

    /// Stores `instance` as idle under `identifier`. Returns false when the
    /// key is at capacity and the instance was dropped instead.
    pub fn put<T: 'static>(&mut self, identifier: impl Into<Cow<'static, str>>, instance: T) -> bool {
        let capacity = self.policy.capacity_per_key;
        let instances = self
            .idle
            .entry(TypeId::of::<T>())
            .or_default()
            .entry(identifier.into())
            .or_default();
        if capacity.is_some_and(|capacity| instances.len() >= capacity) {
            tracing::debug!(ty = type_name::<T>(), "reuse pool at capacity, dropping instance");
            return false;
        }
        instances.push(Box::new(instance));
        true
    }

    /// Reuses an idle instance or creates one, then configures it.
    ///
    /// `create` runs only on a miss; `configure` runs every time.
    pub fn checkout<T: 'static>(
        &mut self,
        identifier: &str,
        create: impl FnOnce() -> T,
        configure: impl FnOnce(&mut T),
    ) -> T {
        let mut instance = self.take(identifier).unwrap_or_else(|| {
            tracing::trace!(identifier, ty = type_name::<T>(), "reuse miss");
            create()
        });
        configure(&mut instance);
        instance
    }

    /// Resets `instance` with `cleanup` and makes it available for reuse.
    pub fn checkin<T: 'static>(
        &mut self,
        identifier: impl Into<Cow<'static, str>>,
        mut instance: T,
        cleanup: impl FnOnce(&mut T),
    ) {
        cleanup(&mut instance);
        self.put(identifier, instance);
    }

    /// Idle instances across all keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.idle
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Whether no instance is idle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Idle instances of `T` under `identifier`.
    #[must_use]
    pub fn len_for<T: 'static>(&self, identifier: &str) -> usize {
        self.idle
            .get(&TypeId::of::<T>())
            .and_then(|buckets| buckets.get(identifier))
            .map_or(0, Vec::len)
    }

    /// Keys that currently hold idle instances.
    pub fn keys(&self) -> impl Iterator<Item = ReuseKey> + '_ {
        self.idle.iter().flat_map(|(type_id, buckets)| {
            buckets
                .iter()
                .filter(|(_, instances)| !instances.is_empty())
                .map(move |(identifier, _)| ReuseKey {
                    identifier: identifier.clone(),
                    type_id: *type_id,
                })
        })
    }

    /// Drops every idle instance.
    pub fn clear(&mut self) {
        self.idle.clear();
    }
}

thread_local! {
    static GLOBAL: RefCell<ReusePool> = RefCell::new(ReusePool::new());
}

/// Runs `f` with this thread's pool.
///
/// # Panics
///
/// Panics if called from inside another `with_pool` closure on the same
/// thread, or during thread teardown.
pub fn with_pool<R>(f: impl FnOnce(&mut ReusePool) -> R) -> R {
    GLOBAL.with(|pool| f(&mut pool.borrow_mut()))
}

/// Like [`with_pool`], but returns `None` instead of panicking when the pool
/// is busy or already destroyed.
pub fn try_with_pool<R>(f: impl FnOnce(&mut ReusePool) -> R) -> Option<R> {
    GLOBAL
        .try_with(|pool| pool.try_borrow_mut().ok().map(|mut pool| f(&mut pool)))
        .ok()
        .flatten()
}

/// Sets the policy of this thread's pool.
pub fn configure_global(policy: ReusePolicy) {
    with_pool(|pool| pool.set_policy(policy));
}
