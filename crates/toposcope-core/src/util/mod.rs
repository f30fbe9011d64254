//! Small building blocks the graphs and groups are made of

pub mod id_allocator;
pub mod index;
pub mod iteration_guard;
pub mod ordered_map;

pub use id_allocator::IdAllocator;
pub use index::{index_map, index_unmap};
pub use iteration_guard::{GuardScope, IterationGuard};
pub use ordered_map::OrderedMap;
