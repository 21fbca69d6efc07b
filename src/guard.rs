use crate::{ObjectPool, PoolAllocator, Poolable, Result};
use alloc::{fmt, rc::Rc};
use core::{
    mem::ManuallyDrop,
    ops::{Deref, DerefMut},
};

impl<T: Poolable, A: PoolAllocator<T>> ObjectPool<T, A> {
    /// Releases an object wrapped in a guard that catches it back into the
    /// pool when dropped.
    ///
    /// Fails exactly like [`Self::release`].
    pub fn checkout(&self) -> Result<Checkout<'_, T, A>> {
        self.release().map(|obj| Checkout::new(obj, self))
    }

    /// Releases an object wrapped in a guard holding an rc reference to the
    /// owning pool. The guard is not limited by the pool's lifetime, which
    /// makes it easier to store in other structures.
    ///
    /// Fails exactly like [`Self::release`].
    pub fn checkout_rc(self: Rc<Self>) -> Result<RcCheckout<T, A>> {
        let obj = self.release()?;
        Ok(RcCheckout::new(obj, self))
    }
}

/// Returns `obj` to `pool`, destroying it if the pool refuses it.
fn give_back<T: Poolable, A: PoolAllocator<T>>(pool: &ObjectPool<T, A>, obj: T) {
    if let Err(err) = pool.catch(obj) {
        pool.discard(err.into_inner());
    }
}

/// A guard over an object checked out of an [`ObjectPool`].
///
/// Dropping the guard catches the object back into the pool. If the pool
/// refuses it (destroyed in the meantime, or full), the object is destroyed
/// through the allocator instead.
pub struct Checkout<'a, T: Poolable, A: PoolAllocator<T>> {
    obj: ManuallyDrop<T>,
    pool: &'a ObjectPool<T, A>,
}

impl<'a, T: Poolable, A: PoolAllocator<T>> Checkout<'a, T, A> {
    fn new(obj: T, pool: &'a ObjectPool<T, A>) -> Self {
        Checkout {
            obj: ManuallyDrop::new(obj),
            pool,
        }
    }

    /// Consumes the guard and returns the object without returning it to the
    /// pool.
    ///
    /// The caller becomes responsible for catching it later, otherwise the
    /// object is lost to the pool.
    pub fn into_inner(self) -> T {
        let mut this = ManuallyDrop::new(self);
        // Safety: `this` is never dropped, so the object is taken only once.
        unsafe { ManuallyDrop::take(&mut this.obj) }
    }
}

impl<'a, T: Poolable, A: PoolAllocator<T>> Deref for Checkout<'a, T, A> {
    type Target = T;
    #[inline(always)]
    fn deref(&self) -> &T {
        &self.obj
    }
}

impl<'a, T: Poolable, A: PoolAllocator<T>> DerefMut for Checkout<'a, T, A> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.obj
    }
}

impl<'a, T: Poolable, A: PoolAllocator<T>> Drop for Checkout<'a, T, A> {
    fn drop(&mut self) {
        // Safety: the object is not used again after being taken here.
        let obj = unsafe { ManuallyDrop::take(&mut self.obj) };
        give_back(self.pool, obj);
    }
}

impl<'a, T: Poolable + fmt::Debug, A: PoolAllocator<T>> fmt::Debug for Checkout<'a, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<'a, T: Poolable, A: PoolAllocator<T>> AsRef<T> for Checkout<'a, T, A> {
    #[inline(always)]
    fn as_ref(&self) -> &T {
        self
    }
}

/// A guard over an object checked out of an rc-wrapped [`ObjectPool`].
///
/// Behaves like [`Checkout`] but keeps the pool alive through an `Rc`.
pub struct RcCheckout<T: Poolable, A: PoolAllocator<T>> {
    obj: ManuallyDrop<T>,
    pool: ManuallyDrop<Rc<ObjectPool<T, A>>>,
}

impl<T: Poolable, A: PoolAllocator<T>> RcCheckout<T, A> {
    fn new(obj: T, pool: Rc<ObjectPool<T, A>>) -> Self {
        RcCheckout {
            obj: ManuallyDrop::new(obj),
            pool: ManuallyDrop::new(pool),
        }
    }

    /// Borrows the pool this object was checked out of.
    pub fn pool(&self) -> &Rc<ObjectPool<T, A>> {
        &self.pool
    }

    /// Consumes the guard and returns the object without returning it to the
    /// pool.
    pub fn into_inner(self) -> T {
        let mut this = ManuallyDrop::new(self);
        // Safety: `this` is never dropped, so each field is taken only once.
        unsafe {
            ManuallyDrop::drop(&mut this.pool);
            ManuallyDrop::take(&mut this.obj)
        }
    }
}

impl<T: Poolable, A: PoolAllocator<T>> Deref for RcCheckout<T, A> {
    type Target = T;
    #[inline(always)]
    fn deref(&self) -> &T {
        &self.obj
    }
}

impl<T: Poolable, A: PoolAllocator<T>> DerefMut for RcCheckout<T, A> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.obj
    }
}

impl<T: Poolable, A: PoolAllocator<T>> Drop for RcCheckout<T, A> {
    fn drop(&mut self) {
        // Safety: neither field is used again after being taken here.
        let (obj, pool) = unsafe {
            (
                ManuallyDrop::take(&mut self.obj),
                ManuallyDrop::take(&mut self.pool),
            )
        };
        give_back(&pool, obj);
    }
}

impl<T: Poolable + fmt::Debug, A: PoolAllocator<T>> fmt::Debug for RcCheckout<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: Poolable, A: PoolAllocator<T>> AsRef<T> for RcCheckout<T, A> {
    #[inline(always)]
    fn as_ref(&self) -> &T {
        self
    }
}

