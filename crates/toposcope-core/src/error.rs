//! Error type shared by graphs, groups and the handle utilities

use thiserror::Error;

/// Result alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Everything that can go wrong while building or querying a graph.
///
/// All of these signal a broken precondition on the caller's side. Nothing is
/// retried or rolled back internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Mutation attempted on a graph whose topology is fixed at construction.
    #[error("{graph}: invalid operation: {operation}")]
    InvalidOperation {
        graph: &'static str,
        operation: &'static str,
    },

    /// Structural mutation attempted while a traversal of the same collection is running.
    #[error("{0}")]
    GuardViolation(&'static str),

    /// Orientation bitmask outside of the known set.
    #[error("invalid edge orientation: {0:#x}")]
    InvalidOrientation(u8),

    #[error("{graph}: no such node matching id: {id}")]
    NodeOutOfBounds { graph: &'static str, id: usize },

    #[error("{graph}: no such edge matching id: {id}")]
    EdgeOutOfBounds { graph: &'static str, id: usize },

    /// Positional lookup past the end of an ordered collection.
    #[error("numeric key {index} is out of bounds (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Freeing an id that is not currently handed out.
    #[error("id not allocated: {0}")]
    NotAllocated(usize),

    #[error("no such node: {0}")]
    NoSuchNode(usize),

    #[error("no such edge: {0}")]
    NoSuchEdge(usize),

    #[error("item not in group: {0}")]
    ItemNotInGroup(usize),

    #[error("invalid torus dimensions {0:?}: every axis needs at least one node")]
    InvalidDimensions(Vec<usize>),
}
