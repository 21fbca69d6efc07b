use parkpool::*;
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct Shell(u32);

impl Poolable for Shell {
    type Handle = u32;

    fn handle(&self) -> u32 {
        self.0
    }
}

#[derive(Debug)]
struct ShellFactory;

impl PoolAllocator<Shell> for ShellFactory {
    fn allocate(&self) -> Shell {
        Shell(0)
    }
}

type ShellPool = ObjectPool<Shell, ShellFactory>;

#[derive(Default)]
struct CountingFactory {
    destroyed: Rc<Cell<usize>>,
}

impl PoolAllocator<Shell> for CountingFactory {
    fn allocate(&self) -> Shell {
        Shell(0)
    }

    fn destroy(&self, _obj: Shell) {
        self.destroyed.set(self.destroyed.get() + 1);
    }
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    (out, logs)
}

#[test]
fn test_first_registration_wins() {
    let mut registry = PoolRegistry::new();
    let first = registry.register(ShellPool::with_allocator(ShellFactory)).unwrap();
    first.create_pool(PoolConfig::fixed(4)).unwrap();

    let second = ShellPool::with_allocator(ShellFactory);
    second.create_pool(PoolConfig::fixed(1)).unwrap();
    let err = registry.register(second).unwrap_err();
    assert!(matches!(err, PoolError::DuplicateInstance { .. }));

    let pool = registry.instance::<ShellPool>().unwrap();
    assert_eq!(pool.capacity(), 4);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_missing_instance() {
    let mut registry = PoolRegistry::default();
    let err = registry.instance::<ShellPool>().unwrap_err();
    match err {
        PoolError::MissingInstance { type_name } => assert!(type_name.contains("ObjectPool")),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(registry.instance_mut::<ShellPool>().is_err());
}

#[test]
fn test_instance_mut_reconfigures() {
    let mut registry = PoolRegistry::new();
    registry.register(ShellPool::new()).unwrap();
    let pool = registry.instance_mut::<ShellPool>().unwrap();
    assert_eq!(
        pool.create_pool(PoolConfig::fixed(2)),
        Err(PoolError::MissingAllocator)
    );
    pool.set_allocator(ShellFactory);
    pool.create_pool(PoolConfig::fixed(2)).unwrap();
    assert_eq!(registry.instance::<ShellPool>().unwrap().len(), 2);
}

#[test]
fn test_remove_allows_new_registration() {
    let mut registry = PoolRegistry::new();
    registry.register(ShellPool::with_allocator(ShellFactory)).unwrap();
    assert!(registry.remove::<ShellPool>().is_some());
    assert!(!registry.contains::<ShellPool>());
    assert!(registry.register(ShellPool::with_allocator(ShellFactory)).is_ok());
}

#[test]
fn test_missing_instance_logs_error() {
    let registry = PoolRegistry::new();
    let (result, logs) = with_logs(|| registry.instance::<ShellPool>().map(|_| ()));
    assert!(matches!(result, Err(PoolError::MissingInstance { .. })));
    assert!(logs.contains("ERROR"), "{logs}");
    assert!(logs.contains("no instance is registered"), "{logs}");
}

#[test]
fn test_duplicate_registration_destroys_parked_objects() {
    let mut registry = PoolRegistry::new();
    registry
        .register(ObjectPool::<Shell, CountingFactory>::with_allocator(CountingFactory::default()))
        .unwrap();

    let factory = CountingFactory::default();
    let destroyed = factory.destroyed.clone();
    let duplicate = ObjectPool::<Shell, CountingFactory>::with_allocator(factory);
    duplicate.create_pool(PoolConfig::fixed(3)).unwrap();

    let (result, logs) = with_logs(|| registry.register(duplicate).map(|_| ()));
    assert!(matches!(result, Err(PoolError::DuplicateInstance { .. })));
    assert_eq!(destroyed.get(), 3);
    assert!(logs.contains("already registered"), "{logs}");
}
