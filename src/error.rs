use core::fmt;
use thiserror::Error;

/// Result type alias for pool operations.
pub type Result<T> = core::result::Result<T, PoolError>;

/// The ways a pool or registry operation can fail.
///
/// None of these are fatal: the operation that produced one left the pool
/// exactly as it found it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PoolError {
    /// `create_pool` was called on a pool that is already active.
    #[error("pool has already been created")]
    AlreadyActive,

    /// `create_pool` was called before an allocator was configured.
    #[error("no allocator is configured for this pool")]
    MissingAllocator,

    /// The pool has not been created, or has been destroyed.
    #[error("pool is not active")]
    Inactive,

    /// There is no parked object left to release.
    #[error("no pooled object is available for release")]
    Empty,

    /// A fixed pool already holds as many parked objects as its capacity.
    #[error("fixed pool is full, capacity {capacity}")]
    AtCapacity {
        /// Capacity of the pool that refused the object.
        capacity: usize,
    },

    /// An object with the same handle is already parked in the pool.
    #[error("object is already parked in the pool")]
    AlreadyPooled,

    /// A registry already owns a pool of this type.
    #[error("an instance of {type_name} is already registered")]
    DuplicateInstance {
        /// Type name of the rejected pool.
        type_name: &'static str,
    },

    /// A registry owns no pool of this type.
    #[error("no instance of {type_name} is registered")]
    MissingInstance {
        /// Type name that was looked up.
        type_name: &'static str,
    },
}

/// The error returned by [`ObjectPool::catch`](crate::ObjectPool::catch).
///
/// The pool refused the object, so ownership goes back to the caller along
/// with the reason.
pub struct CatchError<T> {
    kind: PoolError,
    entity: T,
}

impl<T> CatchError<T> {
    pub(crate) fn new(kind: PoolError, entity: T) -> Self {
        CatchError { kind, entity }
    }

    /// Why the object was refused.
    #[inline]
    pub fn kind(&self) -> PoolError {
        self.kind
    }

    /// Borrows the refused object.
    #[inline]
    pub fn entity(&self) -> &T {
        &self.entity
    }

    /// Takes the refused object back.
    #[inline]
    pub fn into_inner(self) -> T {
        self.entity
    }
}

impl<T> fmt::Debug for CatchError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatchError")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for CatchError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl<T> core::error::Error for CatchError<T> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl<T> From<CatchError<T>> for PoolError {
    fn from(err: CatchError<T>) -> Self {
        err.kind
    }
}
