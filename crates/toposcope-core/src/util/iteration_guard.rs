//! Reentrant traversal guard that rejects structural mutation
//!
//! A guard is a shared reference count. Each traversal holds a [`GuardScope`]
//! for its whole duration; the count drops again when the scope is dropped,
//! including on early return and unwinding. While the count is positive,
//! [`IterationGuard::check`] fails. Nested traversals of the same guard just
//! stack.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{GraphError, GraphResult};

const DEFAULT_MESSAGE: &str = "cannot modify internal state while iterating it";

#[derive(Debug)]
pub struct IterationGuard {
    depth: Rc<Cell<usize>>,
    message: &'static str,
}

impl IterationGuard {
    pub fn new() -> Self {
        Self::with_message(DEFAULT_MESSAGE)
    }

    /// Guard whose violations report `message`.
    pub fn with_message(message: &'static str) -> Self {
        IterationGuard {
            depth: Rc::new(Cell::new(0)),
            message,
        }
    }

    pub fn is_active(&self) -> bool {
        self.depth.get() > 0
    }

    /// Number of traversals currently running under this guard.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Fails with a guard violation if any traversal is running.
    pub fn check(&self) -> GraphResult<()> {
        if self.is_active() {
            return Err(GraphError::GuardViolation(self.message));
        }
        Ok(())
    }

    /// Check several guards at once; the first active one wins.
    pub fn check_all(guards: &[&IterationGuard]) -> GraphResult<()> {
        guards.iter().try_for_each(|guard| guard.check())
    }

    /// Mark a traversal as running until the returned scope is dropped.
    ///
    /// The scope owns its own handle on the counter, so it does not borrow
    /// the guard and the traversal body is free to take `&mut` on the owner.
    #[must_use = "the traversal ends as soon as the scope is dropped"]
    pub fn enter(&self) -> GuardScope {
        self.depth.set(self.depth.get() + 1);
        GuardScope {
            depth: Rc::clone(&self.depth),
        }
    }

    /// Run `body` as a traversal.
    pub fn run<T>(&self, body: impl FnOnce() -> T) -> T {
        let _scope = self.enter();
        body()
    }
}

impl Default for IterationGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII token for one running traversal.
#[derive(Debug)]
pub struct GuardScope {
    depth: Rc<Cell<usize>>,
}

impl Drop for GuardScope {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
