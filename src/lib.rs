#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs, missing_debug_implementations)]
extern crate alloc;
mod config;
mod error;
mod guard;
mod object_pool;
mod pool_allocator;
mod poolable;
mod registry;

pub use config::*;
pub use error::*;
pub use guard::*;
pub use object_pool::*;
pub use pool_allocator::*;
pub use poolable::*;
pub use registry::*;
