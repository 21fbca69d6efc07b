use crate::{CatchError, PoolAllocator, PoolConfig, PoolError, PoolStatus, Poolable, Result};
use alloc::{collections::VecDeque, rc::Rc};
use core::{cell::RefCell, mem};

/// Mutable part of the pool, kept behind a `RefCell` so checkout guards can
/// hold a shared reference to the pool.
#[derive(Debug)]
struct PoolState<T> {
    available: VecDeque<T>,
    capacity: usize,
    fixed: bool,
    status: PoolStatus,
}

impl<T> PoolState<T> {
    const fn new() -> Self {
        PoolState {
            available: VecDeque::new(),
            capacity: 0,
            fixed: true,
            status: PoolStatus::Uninitialized,
        }
    }
}

impl<T: Poolable> PoolState<T> {
    /// Decides whether `obj` may be parked right now.
    fn admit(&self, obj: &T) -> Result<()> {
        if !self.status.is_active() {
            tracing::error!("cannot catch: pool is not active");
            return Err(PoolError::Inactive);
        }
        if self.fixed && self.available.len() >= self.capacity {
            tracing::warn!(
                capacity = self.capacity,
                "fixed pool is full, refusing returned object"
            );
            return Err(PoolError::AtCapacity {
                capacity: self.capacity,
            });
        }
        let handle = obj.handle();
        if self.available.iter().any(|parked| parked.handle() == handle) {
            tracing::warn!("object is already parked, refusing duplicate return");
            return Err(PoolError::AlreadyPooled);
        }
        Ok(())
    }
}

/// A single-owner pool of pre-constructed objects.
///
/// The pool starts out uninitialized. [`Self::create_pool`] fills it with
/// objects built by the configured allocator; [`Self::release`] hands the
/// oldest parked object out and [`Self::catch`] parks an object again.
/// [`Self::destroy_pool`] tears every parked object down and returns the pool
/// to its inactive state, from which it may be created again.
///
/// Every failure is reported both as an `Err` and as a `tracing` event; the
/// pool is never left half-modified.
///
/// The pool is meant to be driven from one thread and is not `Sync`.
#[derive(Debug)]
pub struct ObjectPool<T, A: PoolAllocator<T>> {
    allocator: Option<A>,
    state: RefCell<PoolState<T>>,
}

impl<T, A: PoolAllocator<T>> ObjectPool<T, A> {
    /// Creates an uninitialized pool with no allocator.
    ///
    /// [`Self::create_pool`] fails with [`PoolError::MissingAllocator`] until
    /// one is configured with [`Self::set_allocator`].
    pub const fn new() -> Self {
        ObjectPool {
            allocator: None,
            state: RefCell::new(PoolState::new()),
        }
    }

    /// Creates an uninitialized pool that builds its objects with
    /// `allocator`.
    pub const fn with_allocator(allocator: A) -> Self {
        ObjectPool {
            allocator: Some(allocator),
            state: RefCell::new(PoolState::new()),
        }
    }

    /// Replaces the allocator, returning the previous one.
    ///
    /// Objects already parked stay in the pool and will be torn down by the
    /// new allocator.
    pub fn set_allocator(&mut self, allocator: A) -> Option<A> {
        self.allocator.replace(allocator)
    }

    /// Borrows the configured allocator, if any.
    pub fn allocator(&self) -> Option<&A> {
        self.allocator.as_ref()
    }

    /// Wraps the pool in a reference counter, enabling
    /// [`Self::checkout_rc`].
    pub fn to_rc(self) -> Rc<Self> {
        Rc::new(self)
    }

    /// Gets the number of objects currently parked in the pool.
    pub fn len(&self) -> usize {
        self.state.borrow().available.len()
    }

    /// Checks if no object is parked in the pool.
    pub fn is_empty(&self) -> bool {
        self.state.borrow().available.is_empty()
    }

    /// Gets the capacity the pool was created with, or 0 when inactive.
    ///
    /// For a fixed pool this is the most objects it will ever hold; for a
    /// growable pool it is only the initial fill.
    pub fn capacity(&self) -> usize {
        self.state.borrow().capacity
    }

    /// Whether returns beyond [`Self::capacity`] are rejected.
    pub fn is_fixed(&self) -> bool {
        self.state.borrow().fixed
    }

    /// Whether the pool has been created and not destroyed since.
    pub fn is_active(&self) -> bool {
        self.state.borrow().status.is_active()
    }

    /// Current lifecycle state.
    pub fn status(&self) -> PoolStatus {
        self.state.borrow().status
    }

    /// Capacity and mode currently in effect.
    pub fn config(&self) -> PoolConfig {
        let state = self.state.borrow();
        PoolConfig::new(state.capacity, state.fixed)
    }
}

impl<T, A: PoolAllocator<T>> Default for ObjectPool<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parked objects are torn down through the allocator, as by
/// [`ObjectPool::destroy_pool`]. Checked-out objects are not tracked and are
/// left to their holders.
impl<T, A: PoolAllocator<T>> Drop for ObjectPool<T, A> {
    fn drop(&mut self) {
        let available = mem::take(&mut self.state.get_mut().available);
        if let Some(allocator) = self.allocator.as_ref() {
            available.into_iter().for_each(|obj| allocator.destroy(obj));
        }
    }
}

impl<T: Poolable, A: PoolAllocator<T>> ObjectPool<T, A> {
    /// Checks whether an object with the given handle is currently parked.
    pub fn contains(&self, handle: &T::Handle) -> bool {
        self.state
            .borrow()
            .available
            .iter()
            .any(|obj| obj.handle() == *handle)
    }

    /// Fills the pool with `config.capacity` freshly allocated, deactivated
    /// objects and makes it active.
    ///
    /// Objects are parked in construction order. Fails without touching the
    /// pool if it is already active or if no allocator is configured.
    pub fn create_pool(&self, config: PoolConfig) -> Result<()> {
        if self.is_active() {
            tracing::warn!(
                capacity = config.capacity,
                fixed = config.fixed,
                "pool has already been created, ignoring"
            );
            return Err(PoolError::AlreadyActive);
        }
        let Some(allocator) = self.allocator.as_ref() else {
            tracing::error!("cannot create pool: no allocator is configured");
            return Err(PoolError::MissingAllocator);
        };

        let mut available = VecDeque::with_capacity(config.capacity);
        for _ in 0..config.capacity {
            let mut obj = allocator.allocate();
            allocator.deactivate(&mut obj);
            available.push_back(obj);
        }

        let mut state = self.state.borrow_mut();
        state.available = available;
        state.capacity = config.capacity;
        state.fixed = config.fixed;
        state.status = PoolStatus::Active;
        tracing::debug!(
            capacity = config.capacity,
            fixed = config.fixed,
            "pool created"
        );
        Ok(())
    }

    /// Destroys every parked object through the allocator and deactivates
    /// the pool.
    ///
    /// Objects that are checked out at this point are not tracked by the
    /// pool and are left alone. Capacity drops to 0 and the pool reverts to
    /// fixed mode.
    pub fn destroy_pool(&self) -> Result<()> {
        let available = {
            let mut state = self.state.borrow_mut();
            if !state.status.is_active() {
                drop(state);
                tracing::error!("cannot destroy pool: pool is not active");
                return Err(PoolError::Inactive);
            }
            state.capacity = 0;
            state.fixed = true;
            state.status = PoolStatus::Destroyed;
            mem::take(&mut state.available)
        };

        let destroyed = available.len();
        match self.allocator.as_ref() {
            Some(allocator) => available.into_iter().for_each(|obj| allocator.destroy(obj)),
            None => drop(available),
        }
        tracing::debug!(destroyed, "pool destroyed");
        Ok(())
    }

    /// Takes the oldest parked object out of the pool.
    ///
    /// The object is activated and its [`Poolable::on_checked_out`] hook runs
    /// before it is returned. Fails with [`PoolError::Inactive`] or
    /// [`PoolError::Empty`]; neither is fatal.
    pub fn release(&self) -> Result<T> {
        let popped = {
            let mut state = self.state.borrow_mut();
            if state.status.is_active() {
                Ok(state.available.pop_front())
            } else {
                Err(PoolError::Inactive)
            }
        };

        let mut obj = match popped {
            Ok(Some(obj)) => obj,
            Ok(None) => {
                tracing::error!("cannot release: no pooled object is available");
                return Err(PoolError::Empty);
            }
            Err(err) => {
                tracing::error!("cannot release: pool is not active");
                return Err(err);
            }
        };

        if let Some(allocator) = self.allocator.as_ref() {
            allocator.activate(&mut obj);
        }
        obj.on_checked_out();
        tracing::trace!(remaining = self.len(), "object released");
        Ok(obj)
    }

    /// Parks an object at the back of the pool.
    ///
    /// The object's [`Poolable::on_returned`] hook runs, then it is
    /// deactivated and enqueued. The pool refuses the object, handing it back
    /// inside the error, when the pool is inactive, when a fixed pool is
    /// already full, or when an object with the same handle is already
    /// parked. A refused object's hooks do not run, unless the refusal comes
    /// from the hooks themselves changing the pool (catching another object,
    /// destroying the pool), in which case the object is handed back
    /// deactivated.
    pub fn catch(&self, mut obj: T) -> core::result::Result<(), CatchError<T>> {
        let admitted = self.state.borrow().admit(&obj);
        if let Err(kind) = admitted {
            return Err(CatchError::new(kind, obj));
        }

        obj.on_returned();
        if let Some(allocator) = self.allocator.as_ref() {
            allocator.deactivate(&mut obj);
        }

        // hooks may have reached the pool, so admission is decided again
        let mut state = self.state.borrow_mut();
        if let Err(kind) = state.admit(&obj) {
            return Err(CatchError::new(kind, obj));
        }
        state.available.push_back(obj);
        tracing::trace!(available = state.available.len(), "object caught");
        Ok(())
    }

    /// Disposes of an object the pool would not take back.
    pub(crate) fn discard(&self, obj: T) {
        match self.allocator.as_ref() {
            Some(allocator) => allocator.destroy(obj),
            None => drop(obj),
        }
    }
}
