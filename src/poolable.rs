/// A trait for entities that can be parked in an [`ObjectPool`].
///
/// Every pooled entity exposes a stable handle that identifies it
/// independently of whether it is currently checked out or parked, plus two
/// hooks the pool fires on state transitions. The pool never interprets what
/// the hooks do.
///
/// [`ObjectPool`]: crate::ObjectPool
pub trait Poolable {
    /// Identity of a pooled entity. Two entities are the same entity when
    /// their handles compare equal.
    type Handle: PartialEq;

    /// Returns the handle identifying this entity.
    fn handle(&self) -> Self::Handle;

    /// Called exactly once each time the entity is taken out of the pool by
    /// [`ObjectPool::release`](crate::ObjectPool::release), after it has been
    /// activated.
    ///
    /// By default, this method do nothing.
    #[inline(always)]
    fn on_checked_out(&mut self) {}

    /// Called exactly once each time the entity is accepted back by
    /// [`ObjectPool::catch`](crate::ObjectPool::catch), before it is
    /// deactivated and enqueued.
    ///
    /// By default, this method do nothing.
    #[inline(always)]
    fn on_returned(&mut self) {}
}
