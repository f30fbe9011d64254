//! Mutable general-purpose graph with explicit adjacency

use std::cell::RefCell;
use std::fmt;
use std::ops::ControlFlow;
use std::rc::Rc;

use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::model::{EdgeId, ElementData, NodeId};
use crate::orientation::{EdgeEnds, EdgeOrientation};
use crate::util::{IdAllocator, IterationGuard, OrderedMap};

const NODE_GUARD_MESSAGE: &str = "cannot add or remove nodes while iterating over them";
const EDGE_GUARD_MESSAGE: &str = "cannot add or remove edges while iterating over them";

struct NodeEntry {
    data: ElementData,
    /// edge -> node the edge arrives from
    in_edges: OrderedMap<EdgeId, NodeId>,
    /// edge -> node the edge leads to
    out_edges: OrderedMap<EdgeId, NodeId>,
}

struct EdgeEntry {
    source: NodeId,
    destination: NodeId,
    orientation: EdgeOrientation,
    data: ElementData,
}

/// Arbitrary topology, handle-addressed storage.
///
/// Which adjacency entries an edge creates is decided by its orientation:
/// anything that [links forward](EdgeOrientation::links_forward) registers
/// `source -> destination`, anything that links backward registers
/// `destination -> source`. Deletion removes exactly those entries again.
///
/// Parallel edges are allowed; adjacency is keyed by edge handle.
pub struct DirectedGraph {
    nodes: OrderedMap<NodeId, NodeEntry>,
    edges: OrderedMap<EdgeId, EdgeEntry>,
    node_ids: IdAllocator,
    edge_ids: IdAllocator,
    node_guard: IterationGuard,
    edge_guard: IterationGuard,
    /// Incident edges per node, indexed by node handle; `None` until asked for
    /// and again after any adjacency change on that node.
    incident_cache: RefCell<Vec<Option<Rc<[EdgeId]>>>>,
}

impl DirectedGraph {
    pub fn new() -> Self {
        DirectedGraph {
            nodes: OrderedMap::new(),
            edges: OrderedMap::new(),
            node_ids: IdAllocator::new(),
            edge_ids: IdAllocator::new(),
            node_guard: IterationGuard::with_message(NODE_GUARD_MESSAGE),
            edge_guard: IterationGuard::with_message(EDGE_GUARD_MESSAGE),
            incident_cache: RefCell::new(Vec::new()),
        }
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains_key(&edge)
    }

    /// Edges arriving at `node`, in creation order.
    pub fn in_edges(&self, node: NodeId) -> GraphResult<Vec<EdgeId>> {
        Ok(self.node(node)?.in_edges.keys().copied().collect())
    }

    /// Edges leaving `node`, in creation order.
    pub fn out_edges(&self, node: NodeId) -> GraphResult<Vec<EdgeId>> {
        Ok(self.node(node)?.out_edges.keys().copied().collect())
    }

    fn check_guards(&self) -> GraphResult<()> {
        IterationGuard::check_all(&[&self.node_guard, &self.edge_guard])
    }

    fn node(&self, node: NodeId) -> GraphResult<&NodeEntry> {
        self.nodes.get(&node).ok_or(GraphError::NoSuchNode(node.index()))
    }

    fn node_mut(&mut self, node: NodeId) -> GraphResult<&mut NodeEntry> {
        self.nodes.get_mut(&node).ok_or(GraphError::NoSuchNode(node.index()))
    }

    fn edge(&self, edge: EdgeId) -> GraphResult<&EdgeEntry> {
        self.edges.get(&edge).ok_or(GraphError::NoSuchEdge(edge.index()))
    }

    fn invalidate(&self, node: NodeId) {
        if let Some(slot) = self.incident_cache.borrow_mut().get_mut(node.index()) {
            *slot = None;
        }
    }

    fn incident(&self, node: NodeId) -> GraphResult<Rc<[EdgeId]>> {
        let entry = self.node(node)?;
        let mut cache = self.incident_cache.borrow_mut();
        if let Some(Some(cached)) = cache.get(node.index()) {
            return Ok(Rc::clone(cached));
        }

        let mut edges: Vec<EdgeId> = entry.out_edges.keys().copied().collect();
        edges.extend(entry.in_edges.keys().filter(|e| !entry.out_edges.contains_key(e)));
        let edges: Rc<[EdgeId]> = edges.into();

        if cache.len() <= node.index() {
            cache.resize(node.index() + 1, None);
        }
        cache[node.index()] = Some(Rc::clone(&edges));
        Ok(edges)
    }
}

impl Default for DirectedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DirectedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectedGraph")
            .field("node_count", &self.nodes.len())
            .field("edge_count", &self.edges.len())
            .finish()
    }
}

impl Graph for DirectedGraph {
    fn new_node(&mut self, data: ElementData) -> GraphResult<NodeId> {
        self.check_guards()?;
        let node = NodeId(self.node_ids.alloc());
        self.nodes.insert(
            node,
            NodeEntry {
                data,
                in_edges: OrderedMap::new(),
                out_edges: OrderedMap::new(),
            },
        );
        // The handle may be a reused one.
        self.invalidate(node);
        Ok(node)
    }

    fn delete_node(&mut self, node: NodeId) -> GraphResult<()> {
        self.check_guards()?;
        let incident = self.incident(node)?;
        debug!(node = node.index(), edges = incident.len(), "deleting node with incident edges");
        for &edge in incident.iter() {
            self.delete_edge(edge)?;
        }
        self.nodes.remove(&node);
        self.node_ids.free(node.index())?;
        self.invalidate(node);
        Ok(())
    }

    fn new_edge(
        &mut self,
        source: NodeId,
        destination: NodeId,
        orientation: EdgeOrientation,
    ) -> GraphResult<EdgeId> {
        self.check_guards()?;
        self.node(source)?;
        self.node(destination)?;

        let edge = EdgeId(self.edge_ids.alloc());
        if orientation.links_forward() {
            self.node_mut(source)?.out_edges.insert(edge, destination);
            self.node_mut(destination)?.in_edges.insert(edge, source);
        }
        if orientation.links_backward() {
            self.node_mut(destination)?.out_edges.insert(edge, source);
            self.node_mut(source)?.in_edges.insert(edge, destination);
        }
        self.edges.insert(
            edge,
            EdgeEntry {
                source,
                destination,
                orientation,
                data: ElementData::new(),
            },
        );
        self.invalidate(source);
        self.invalidate(destination);
        Ok(edge)
    }

    fn delete_edge(&mut self, edge: EdgeId) -> GraphResult<()> {
        self.check_guards()?;
        let EdgeEntry {
            source,
            destination,
            orientation,
            ..
        } = *self.edge(edge)?;

        if orientation.links_forward() {
            self.node_mut(source)?.out_edges.remove(&edge);
            self.node_mut(destination)?.in_edges.remove(&edge);
        }
        if orientation.links_backward() {
            self.node_mut(destination)?.out_edges.remove(&edge);
            self.node_mut(source)?.in_edges.remove(&edge);
        }
        self.edges.remove(&edge);
        self.edge_ids.free(edge.index())?;
        self.invalidate(source);
        self.invalidate(destination);
        Ok(())
    }

    fn clear(&mut self) -> GraphResult<()> {
        self.check_guards()?;
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "clearing directed graph"
        );
        self.nodes.clear();
        self.edges.clear();
        self.node_ids.free_all();
        self.edge_ids.free_all();
        self.incident_cache.borrow_mut().clear();
        Ok(())
    }

    fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    fn node_data(&self, node: NodeId) -> GraphResult<&ElementData> {
        Ok(&self.node(node)?.data)
    }

    fn node_data_mut(&mut self, node: NodeId) -> GraphResult<&mut ElementData> {
        Ok(&mut self.node_mut(node)?.data)
    }

    fn edge_data(&self, edge: EdgeId) -> GraphResult<&ElementData> {
        Ok(&self.edge(edge)?.data)
    }

    fn edge_data_mut(&mut self, edge: EdgeId) -> GraphResult<&mut ElementData> {
        self.edges
            .get_mut(&edge)
            .map(|entry| &mut entry.data)
            .ok_or(GraphError::NoSuchEdge(edge.index()))
    }

    fn edge_ends(&self, edge: EdgeId) -> GraphResult<EdgeEnds> {
        let entry = self.edge(edge)?;
        Ok(EdgeEnds::new(entry.source, entry.destination, entry.orientation))
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys().copied()
    }

    fn incident_edges(&self, node: NodeId) -> GraphResult<Vec<EdgeId>> {
        Ok(self.incident(node)?.to_vec())
    }

    fn iter_nodes<B, F>(&mut self, mut callback: F) -> ControlFlow<B>
    where
        F: FnMut(&mut Self, NodeId) -> ControlFlow<B>,
    {
        let _scope = self.node_guard.enter();
        let nodes: Vec<NodeId> = self.nodes.keys().copied().collect();
        nodes.into_iter().try_for_each(|node| callback(self, node))
    }

    fn iter_edges<B, F>(&mut self, mut callback: F) -> ControlFlow<B>
    where
        F: FnMut(&mut Self, EdgeId) -> ControlFlow<B>,
    {
        let _scope = self.edge_guard.enter();
        let edges: Vec<EdgeId> = self.edges.keys().copied().collect();
        edges.into_iter().try_for_each(|edge| callback(self, edge))
    }

    fn iter_node_edges<B, F>(&mut self, node: NodeId, mut callback: F) -> GraphResult<ControlFlow<B>>
    where
        F: FnMut(&mut Self, EdgeId) -> ControlFlow<B>,
    {
        let incident = self.incident(node)?;
        let _scope = self.edge_guard.enter();
        Ok(incident.iter().try_for_each(|&edge| callback(self, edge)))
    }
}
