/// Sizing and mode of an [`ObjectPool`](crate::ObjectPool), applied by
/// [`create_pool`](crate::ObjectPool::create_pool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// Number of objects allocated up front. For fixed pools this is also
    /// the maximum number of parked objects.
    pub capacity: usize,
    /// Whether returns beyond `capacity` are rejected. A growable pool
    /// accepts every return.
    pub fixed: bool,
}

impl PoolConfig {
    /// Creates a configuration with an explicit mode.
    #[inline]
    pub const fn new(capacity: usize, fixed: bool) -> Self {
        Self { capacity, fixed }
    }

    /// A pool that never holds more than `capacity` parked objects.
    #[inline]
    pub const fn fixed(capacity: usize) -> Self {
        Self::new(capacity, true)
    }

    /// A pool that starts with `capacity` objects and accepts every return.
    #[inline]
    pub const fn growable(capacity: usize) -> Self {
        Self::new(capacity, false)
    }
}

/// Empty and fixed, which is also what a destroyed pool reports.
impl Default for PoolConfig {
    fn default() -> Self {
        Self::fixed(0)
    }
}

/// Lifecycle state of an [`ObjectPool`](crate::ObjectPool).
///
/// `Uninitialized` and `Destroyed` behave the same: every operation other
/// than `create_pool` fails. They are kept apart for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PoolStatus {
    /// `create_pool` has never succeeded.
    #[default]
    Uninitialized,
    /// Objects can be released and caught.
    Active,
    /// `destroy_pool` ran; the pool may be created again.
    Destroyed,
}

impl PoolStatus {
    /// Returns `true` for [`PoolStatus::Active`].
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, PoolStatus::Active)
    }
}
