//! The graph contract shared by every topology

use std::ops::ControlFlow;

use crate::error::GraphResult;
use crate::model::{EdgeId, ElementData, NodeId};
use crate::orientation::{EdgeEnds, EdgeOrientation};

/// A graph of nodes and oriented edges addressed by dense handles.
///
/// Implementations range from fully mutable general graphs to fixed, implicit
/// topologies that reject every mutation. Required methods cover storage;
/// the orientation queries are provided on top of [`Graph::edge_ends`] and
/// only need overriding when a topology can answer them more cheaply.
///
/// Traversal callbacks receive `&mut Self` and may call any method, but a
/// structural mutation attempted from inside a traversal fails with
/// [`GraphError::GuardViolation`](crate::GraphError::GuardViolation).
/// Returning [`ControlFlow::Break`] stops a traversal early.
pub trait Graph {
    /// Create a node carrying `data`.
    fn new_node(&mut self, data: ElementData) -> GraphResult<NodeId>;

    /// Delete a node together with every edge incident to it.
    fn delete_node(&mut self, node: NodeId) -> GraphResult<()>;

    /// Create an edge from `source` to `destination`.
    fn new_edge(
        &mut self,
        source: NodeId,
        destination: NodeId,
        orientation: EdgeOrientation,
    ) -> GraphResult<EdgeId>;

    fn delete_edge(&mut self, edge: EdgeId) -> GraphResult<()>;

    /// Remove every node and edge.
    fn clear(&mut self) -> GraphResult<()>;

    fn number_of_nodes(&self) -> usize;

    fn number_of_edges(&self) -> usize;

    fn node_data(&self, node: NodeId) -> GraphResult<&ElementData>;

    fn node_data_mut(&mut self, node: NodeId) -> GraphResult<&mut ElementData>;

    fn edge_data(&self, edge: EdgeId) -> GraphResult<&ElementData>;

    fn edge_data_mut(&mut self, edge: EdgeId) -> GraphResult<&mut ElementData>;

    /// Stored source, destination and orientation of `edge`.
    fn edge_ends(&self, edge: EdgeId) -> GraphResult<EdgeEnds>;

    /// All node handles, in the graph's natural order.
    fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_;

    /// All edge handles, in the graph's natural order.
    fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_;

    /// Handles of the edges touching `node`, each listed once.
    fn incident_edges(&self, node: NodeId) -> GraphResult<Vec<EdgeId>>;

    /// Visit every node.
    fn iter_nodes<B, F>(&mut self, mut callback: F) -> ControlFlow<B>
    where
        Self: Sized,
        F: FnMut(&mut Self, NodeId) -> ControlFlow<B>,
    {
        let nodes: Vec<NodeId> = self.node_ids().collect();
        nodes.into_iter().try_for_each(|node| callback(self, node))
    }

    /// Visit every edge.
    fn iter_edges<B, F>(&mut self, mut callback: F) -> ControlFlow<B>
    where
        Self: Sized,
        F: FnMut(&mut Self, EdgeId) -> ControlFlow<B>,
    {
        let edges: Vec<EdgeId> = self.edge_ids().collect();
        edges.into_iter().try_for_each(|edge| callback(self, edge))
    }

    /// Visit the edges incident to `node`.
    fn iter_node_edges<B, F>(&mut self, node: NodeId, mut callback: F) -> GraphResult<ControlFlow<B>>
    where
        Self: Sized,
        F: FnMut(&mut Self, EdgeId) -> ControlFlow<B>,
    {
        let edges = self.incident_edges(node)?;
        Ok(edges.into_iter().try_for_each(|edge| callback(self, edge)))
    }

    fn edge_orientation(&self, edge: EdgeId) -> GraphResult<EdgeOrientation> {
        Ok(self.edge_ends(edge)?.orientation)
    }

    /// Source node under the direct interpretation.
    fn edge_source(&self, edge: EdgeId) -> GraphResult<NodeId> {
        Ok(self.edge_ends(edge)?.source)
    }

    /// Destination node under the direct interpretation.
    fn edge_destination(&self, edge: EdgeId) -> GraphResult<NodeId> {
        Ok(self.edge_ends(edge)?.destination)
    }

    /// The node sharing `edge` with `node`, or `None` if `edge` does not touch `node`.
    fn node_neighbor(&self, node: NodeId, edge: EdgeId) -> GraphResult<Option<NodeId>> {
        Ok(self.edge_ends(edge)?.neighbor(node))
    }

    fn edge_canonical_sources(&self, edge: EdgeId) -> GraphResult<Vec<NodeId>> {
        Ok(self.edge_ends(edge)?.canonical_sources())
    }

    fn edge_canonical_destinations(&self, edge: EdgeId) -> GraphResult<Vec<NodeId>> {
        Ok(self.edge_ends(edge)?.canonical_destinations())
    }

    fn edge_symmetrical_sources(&self, edge: EdgeId) -> GraphResult<Vec<NodeId>> {
        Ok(self.edge_ends(edge)?.symmetrical_sources())
    }

    fn edge_symmetrical_destinations(&self, edge: EdgeId) -> GraphResult<Vec<NodeId>> {
        Ok(self.edge_ends(edge)?.symmetrical_destinations())
    }

    fn is_incident_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_incident(node))
    }

    fn is_self_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_self_edge(node))
    }

    fn is_directed_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_directed(node))
    }

    fn is_undirected_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_undirected(node))
    }

    fn is_reversed_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_reversed(node))
    }

    fn is_bidirectional_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_bidirectional(node))
    }

    fn is_canonically_directed_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_canonically_directed(node))
    }

    fn is_canonically_undirected_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_canonically_undirected(node))
    }

    fn is_symmetric_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_symmetric(node))
    }

    fn is_asymmetric_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_asymmetric(node))
    }

    fn is_in_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_in(node))
    }

    fn is_out_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_out(node))
    }

    fn is_canonically_in_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_canonically_in(node))
    }

    fn is_canonically_out_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_canonically_out(node))
    }

    fn is_symmetrically_in_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_symmetrically_in(node))
    }

    fn is_symmetrically_out_edge(&self, edge: EdgeId, node: NodeId) -> GraphResult<bool> {
        Ok(self.edge_ends(edge)?.is_symmetrically_out(node))
    }
}
