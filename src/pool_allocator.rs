/// A trait defining the host capabilities an [`ObjectPool`] relies on.
///
/// The pool never constructs, shows, hides or tears down entities by itself;
/// it asks the allocator. Only [`allocate`](Self::allocate) is required, the
/// activation and destruction primitives default to doing nothing beyond
/// dropping the value.
///
/// [`ObjectPool`]: crate::ObjectPool
pub trait PoolAllocator<T> {
    /// Creates a new, not yet pooled object of type T.
    fn allocate(&self) -> T;

    /// Puts an object into its active state right before it is handed out.
    ///
    /// By default, this method do nothing.
    #[inline(always)]
    fn activate(&self, _obj: &mut T) {}

    /// Puts an object into its parked state. Called for every freshly
    /// allocated object when the pool is created and for every object the
    /// pool accepts back.
    ///
    /// By default, this method do nothing.
    #[inline(always)]
    fn deactivate(&self, _obj: &mut T) {}

    /// Releases the backing resource of an object the pool is discarding.
    ///
    /// By default, the object is simply dropped.
    #[inline(always)]
    fn destroy(&self, obj: T) {
        drop(obj);
    }
}

/// Any zero-argument closure is an allocator with no-op activation hooks.
impl<T, F> PoolAllocator<T> for F
where
    F: Fn() -> T,
{
    #[inline(always)]
    fn allocate(&self) -> T {
        self()
    }
}
