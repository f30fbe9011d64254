//! Dense id allocation with reuse of freed ids

use std::collections::BTreeSet;

use crate::error::{GraphError, GraphResult};

/// Hands out small non-negative integers and takes them back.
///
/// Freed ids are reused lowest-first before the counter grows, which keeps
/// handles dense enough to index straight into a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    counter: usize,
    free: BTreeSet<usize>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> usize {
        match self.free.pop_first() {
            Some(id) => id,
            None => {
                let id = self.counter;
                self.counter += 1;
                id
            }
        }
    }

    pub fn is_allocated(&self, id: usize) -> bool {
        id < self.counter && !self.free.contains(&id)
    }

    /// Return `id` to the pool. Fails if it is not currently allocated.
    pub fn free(&mut self, id: usize) -> GraphResult<()> {
        if !self.is_allocated(id) {
            return Err(GraphError::NotAllocated(id));
        }
        if id + 1 == self.counter {
            // Shrink the counter past any trailing free ids.
            self.counter = id;
            while self.counter > 0 && self.free.remove(&(self.counter - 1)) {
                self.counter -= 1;
            }
        } else {
            self.free.insert(id);
        }
        Ok(())
    }

    pub fn free_all(&mut self) {
        self.counter = 0;
        self.free.clear();
    }

    /// Number of ids currently allocated.
    pub fn len(&self) -> usize {
        self.counter - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One past the highest id ever outstanding; an upper bound for arena sizing.
    pub fn capacity_hint(&self) -> usize {
        self.counter
    }
}
