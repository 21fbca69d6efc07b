use crate::{PoolError, Result};
use alloc::{
    boxed::Box,
    collections::{btree_map::Entry, BTreeMap},
};
use core::any::{type_name, Any, TypeId};

/// The owning context for pools: holds at most one pool per concrete type.
///
/// The application creates one registry, registers its pools at start-up and
/// passes the registry (or the pools borrowed from it) to whoever needs
/// them. The first pool registered for a type wins; later registrations of
/// the same type are rejected and the rejected pool is dropped, which
/// destroys whatever it had parked.
///
/// Any `'static` type can be registered. Giving each pool its own newtype or
/// allocator type yields one slot per (owner, object) pairing.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: BTreeMap<TypeId, Box<dyn Any>>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        PoolRegistry {
            pools: BTreeMap::new(),
        }
    }

    /// Takes ownership of `pool` unless a pool of the same type is already
    /// registered, and returns a reference to the registered instance.
    ///
    /// A duplicate is dropped and reported as
    /// [`PoolError::DuplicateInstance`]; the existing instance is untouched.
    /// Dropping an [`ObjectPool`](crate::ObjectPool) destroys its parked
    /// objects through its allocator.
    pub fn register<P: Any>(&mut self, pool: P) -> Result<&mut P> {
        let type_name = type_name::<P>();
        match self.pools.entry(TypeId::of::<P>()) {
            Entry::Occupied(_) => {
                drop(pool);
                tracing::warn!(type_name, "an instance is already registered, dropping duplicate");
                Err(PoolError::DuplicateInstance { type_name })
            }
            Entry::Vacant(slot) => {
                tracing::debug!(type_name, "instance registered");
                slot.insert(Box::new(pool))
                    .downcast_mut::<P>()
                    .ok_or(PoolError::MissingInstance { type_name })
            }
        }
    }

    /// Borrows the registered instance of `P`.
    pub fn instance<P: Any>(&self) -> Result<&P> {
        self.pools
            .get(&TypeId::of::<P>())
            .and_then(|pool| pool.downcast_ref::<P>())
            .ok_or_else(missing::<P>)
    }

    /// Mutably borrows the registered instance of `P`.
    pub fn instance_mut<P: Any>(&mut self) -> Result<&mut P> {
        self.pools
            .get_mut(&TypeId::of::<P>())
            .and_then(|pool| pool.downcast_mut::<P>())
            .ok_or_else(missing::<P>)
    }

    /// Checks whether an instance of `P` is registered.
    pub fn contains<P: Any>(&self) -> bool {
        self.pools.contains_key(&TypeId::of::<P>())
    }

    /// Unregisters the instance of `P` and hands it back, freeing the slot
    /// for a new registration.
    pub fn remove<P: Any>(&mut self) -> Option<P> {
        let pool = self.pools.remove(&TypeId::of::<P>())?;
        pool.downcast::<P>().ok().map(|pool| *pool)
    }

    /// Number of registered instances.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Checks if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

fn missing<P>() -> PoolError {
    let type_name = type_name::<P>();
    tracing::error!(type_name, "no instance is registered");
    PoolError::MissingInstance { type_name }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(u8);

    #[test]
    fn remove_frees_the_slot() {
        let mut registry = PoolRegistry::new();
        registry.register(Marker(1)).unwrap();
        assert_eq!(registry.remove::<Marker>(), Some(Marker(1)));
        assert!(registry.is_empty());
        assert_eq!(registry.register(Marker(2)).map(|m| m.0), Ok(2));
    }

    #[test]
    fn distinct_types_get_distinct_slots() {
        let mut registry = PoolRegistry::new();
        registry.register(Marker(1)).unwrap();
        registry.register(5u32).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.instance::<u32>(), Ok(&5));
        assert!(registry.contains::<Marker>());
        assert!(!registry.contains::<u64>());
    }
}
