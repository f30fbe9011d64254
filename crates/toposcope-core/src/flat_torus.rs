//! Implicit regular N-dimensional torus
//!
//! Nothing per node or edge is stored up front. Handles are decoded with
//! mixed-radix arithmetic (first axis varies fastest):
//!
//! - node handle `n` has coordinates `index_unmap(n, dimensions)`;
//! - edge handle `e = n + d * number_of_nodes` is the edge aligned with axis
//!   `d` leaving node `n` towards the node one step further along `d`,
//!   wrapping at the end of the axis.
//!
//! A size-1 axis therefore contributes a self-edge on every node.

use std::collections::{BTreeMap, HashMap};
use std::ops::ControlFlow;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::model::{EdgeId, ElementData, NodeId};
use crate::orientation::{EdgeEnds, EdgeOrientation};
use crate::util::{index_map, index_unmap};

const NAME: &str = "FlatTorus";

/// What a node or edge reads as before anyone has written to it.
static EMPTY_DATA: ElementData = ElementData {
    position: None,
    attributes: BTreeMap::new(),
};

#[derive(Debug, Clone)]
pub struct FlatTorus {
    dimensions: Vec<usize>,
    number_of_nodes: usize,
    number_of_edges: usize,
    node_data: HashMap<NodeId, ElementData>,
    edge_data: HashMap<EdgeId, ElementData>,
}

impl FlatTorus {
    /// Torus with `dimensions[i]` nodes along axis `i`. Every axis needs at least
    /// one node, and node and edge counts must fit in a `usize`.
    pub fn new(dimensions: Vec<usize>) -> GraphResult<Self> {
        if dimensions.contains(&0) {
            return Err(GraphError::InvalidDimensions(dimensions));
        }
        let counts = dimensions
            .iter()
            .try_fold(1usize, |acc, &size| acc.checked_mul(size))
            .and_then(|nodes| nodes.checked_mul(dimensions.len()).map(|edges| (nodes, edges)));
        let Some((number_of_nodes, number_of_edges)) = counts else {
            return Err(GraphError::InvalidDimensions(dimensions));
        };
        tracing::debug!(?dimensions, number_of_nodes, number_of_edges, "created flat torus");
        Ok(FlatTorus {
            dimensions,
            number_of_nodes,
            number_of_edges,
            node_data: HashMap::new(),
            edge_data: HashMap::new(),
        })
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    pub fn number_of_dimensions(&self) -> usize {
        self.dimensions.len()
    }

    fn check_coordinates(&self, coords: &[usize]) -> GraphResult<()> {
        if coords.len() != self.dimensions.len() {
            return Err(GraphError::IndexOutOfBounds {
                index: coords.len(),
                len: self.dimensions.len(),
            });
        }
        for (&c, &d) in coords.iter().zip(&self.dimensions) {
            if c >= d {
                return Err(GraphError::IndexOutOfBounds { index: c, len: d });
            }
        }
        Ok(())
    }

    fn check_axis(&self, dim: usize) -> GraphResult<()> {
        if dim >= self.dimensions.len() {
            return Err(GraphError::IndexOutOfBounds {
                index: dim,
                len: self.dimensions.len(),
            });
        }
        Ok(())
    }

    /// Node at `coords`.
    pub fn node_at(&self, coords: &[usize]) -> GraphResult<NodeId> {
        self.check_coordinates(coords)?;
        Ok(NodeId(index_map(coords, &self.dimensions)))
    }

    pub fn node_coordinates(&self, node: NodeId) -> GraphResult<Vec<usize>> {
        let node = self.node_by_id(node.index())?;
        Ok(index_unmap(node.index(), &self.dimensions))
    }

    /// Edge aligned with axis `dim` that leaves the node at `coords`.
    pub fn edge_at(&self, coords: &[usize], dim: usize) -> GraphResult<EdgeId> {
        self.check_axis(dim)?;
        let node = self.node_at(coords)?;
        Ok(EdgeId(node.index() + dim * self.number_of_nodes))
    }

    /// Coordinates of the edge's source node, and the axis the edge is aligned with.
    pub fn edge_coordinates(&self, edge: EdgeId) -> GraphResult<(Vec<usize>, usize)> {
        let edge = self.edge_by_id(edge.index())?;
        let node = edge.index() % self.number_of_nodes;
        let dim = edge.index() / self.number_of_nodes;
        Ok((index_unmap(node, &self.dimensions), dim))
    }

    /// Bounds-checked conversion of a raw id into a node handle.
    pub fn node_by_id(&self, id: usize) -> GraphResult<NodeId> {
        if id >= self.number_of_nodes {
            return Err(GraphError::NodeOutOfBounds { graph: NAME, id });
        }
        Ok(NodeId(id))
    }

    /// Bounds-checked conversion of a raw id into an edge handle.
    pub fn edge_by_id(&self, id: usize) -> GraphResult<EdgeId> {
        if id >= self.number_of_edges {
            return Err(GraphError::EdgeOutOfBounds { graph: NAME, id });
        }
        Ok(EdgeId(id))
    }

    fn invalid(operation: &'static str) -> GraphError {
        GraphError::InvalidOperation { graph: NAME, operation }
    }

    /// Validate `edge`, then answer with a constant.
    fn constant(&self, edge: EdgeId, value: bool) -> GraphResult<bool> {
        self.edge_by_id(edge.index())?;
        Ok(value)
    }
}

impl Graph for FlatTorus {
    fn new_node(&mut self, _data: ElementData) -> GraphResult<NodeId> {
        Err(Self::invalid("new_node"))
    }

    fn delete_node(&mut self, _node: NodeId) -> GraphResult<()> {
        Err(Self::invalid("delete_node"))
    }

    fn new_edge(
        &mut self,
        _source: NodeId,
        _destination: NodeId,
        _orientation: EdgeOrientation,
    ) -> GraphResult<EdgeId> {
        Err(Self::invalid("new_edge"))
    }

    fn delete_edge(&mut self, _edge: EdgeId) -> GraphResult<()> {
        Err(Self::invalid("delete_edge"))
    }

    fn clear(&mut self) -> GraphResult<()> {
        Err(Self::invalid("clear"))
    }

    fn number_of_nodes(&self) -> usize {
        self.number_of_nodes
    }

    fn number_of_edges(&self) -> usize {
        self.number_of_edges
    }

    fn node_data(&self, node: NodeId) -> GraphResult<&ElementData> {
        let node = self.node_by_id(node.index())?;
        Ok(self.node_data.get(&node).unwrap_or(&EMPTY_DATA))
    }

    fn node_data_mut(&mut self, node: NodeId) -> GraphResult<&mut ElementData> {
        let node = self.node_by_id(node.index())?;
        Ok(self.node_data.entry(node).or_default())
    }

    fn edge_data(&self, edge: EdgeId) -> GraphResult<&ElementData> {
        let edge = self.edge_by_id(edge.index())?;
        Ok(self.edge_data.get(&edge).unwrap_or(&EMPTY_DATA))
    }

    fn edge_data_mut(&mut self, edge: EdgeId) -> GraphResult<&mut ElementData> {
        let edge = self.edge_by_id(edge.index())?;
        Ok(self.edge_data.entry(edge).or_default())
    }

    fn edge_ends(&self, edge: EdgeId) -> GraphResult<EdgeEnds> {
        let (mut coords, dim) = self.edge_coordinates(edge)?;
        let source = NodeId(index_map(&coords, &self.dimensions));
        coords[dim] = (coords[dim] + 1) % self.dimensions[dim];
        let destination = NodeId(index_map(&coords, &self.dimensions));
        Ok(EdgeEnds::new(source, destination, EdgeOrientation::Undirected))
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.number_of_nodes).map(NodeId)
    }

    fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.number_of_edges).map(EdgeId)
    }

    /// Per axis: the edge leaving the node, then the edge arriving from the
    /// previous node. A size-1 axis has a single self-edge, listed once.
    fn incident_edges(&self, node: NodeId) -> GraphResult<Vec<EdgeId>> {
        let mut coords = self.node_coordinates(node)?;
        let mut edges = Vec::with_capacity(2 * self.dimensions.len());
        for (dim, &size) in self.dimensions.iter().enumerate() {
            let offset = dim * self.number_of_nodes;
            edges.push(EdgeId(node.index() + offset));
            if size > 1 {
                let own = coords[dim];
                coords[dim] = (own + size - 1) % size;
                edges.push(EdgeId(index_map(&coords, &self.dimensions) + offset));
                coords[dim] = own;
            }
        }
        Ok(edges)
    }

    fn iter_nodes<B, F>(&mut self, mut callback: F) -> ControlFlow<B>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<B>,
    {
        (0..self.number_of_nodes)
            .map(NodeId)
            .try_for_each(|node| callback(self, node))
    }

    fn iter_edges<B, F>(&mut self, mut callback: F) -> ControlFlow<B>
    where
        F: FnMut(&mut Self, EdgeId) -> ControlFlow<B>,
    {
        (0..self.number_of_edges)
            .map(EdgeId)
            .try_for_each(|edge| callback(self, edge))
    }

    fn is_directed_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, false)
    }

    fn is_undirected_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, true)
    }

    fn is_reversed_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, false)
    }

    fn is_bidirectional_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, false)
    }

    fn is_canonically_directed_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, false)
    }

    fn is_canonically_undirected_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, true)
    }

    fn is_symmetric_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, true)
    }

    fn is_asymmetric_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, false)
    }

    fn is_canonically_in_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, false)
    }

    fn is_canonically_out_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, false)
    }

    fn is_symmetrically_in_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, true)
    }

    fn is_symmetrically_out_edge(&self, edge: EdgeId, _node: NodeId) -> GraphResult<bool> {
        self.constant(edge, true)
    }
}
