//! Orientation-aware reachability on top of petgraph
//!
//! A [`Graph`] edge can stand for zero, one or two arcs depending on the
//! interpretation: an undirected edge is two arcs symmetrically and none
//! canonically. [`ArcGraph`] materializes those arcs so the petgraph
//! algorithms can run on them.

use std::collections::HashMap;

use petgraph::algo::kosaraju_scc;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::Bfs;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::model::{EdgeId, NodeId};
use crate::orientation::Interpretation;

/// Arcs of a graph under one interpretation. Arc weights are the originating edge.
pub struct ArcGraph {
    inner: StableDiGraph<NodeId, EdgeId>,
    index: HashMap<NodeId, NodeIndex>,
    interpretation: Interpretation,
}

impl std::fmt::Debug for ArcGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcGraph")
            .field("interpretation", &self.interpretation)
            .field("node_count", &self.inner.node_count())
            .field("arc_count", &self.inner.edge_count())
            .finish()
    }
}

impl ArcGraph {
    pub fn build<G: Graph>(graph: &G, interpretation: Interpretation) -> GraphResult<Self> {
        let mut inner = StableDiGraph::with_capacity(graph.number_of_nodes(), graph.number_of_edges());
        let mut index = HashMap::with_capacity(graph.number_of_nodes());
        for node in graph.node_ids() {
            index.insert(node, inner.add_node(node));
        }

        for edge in graph.edge_ids() {
            let ends = graph.edge_ends(edge)?;
            let sources = ends.sources(interpretation);
            let destinations = ends.destinations(interpretation);
            for (source, destination) in sources.into_iter().zip(destinations) {
                let a = *index.get(&source).ok_or(GraphError::NoSuchNode(source.index()))?;
                let b = *index
                    .get(&destination)
                    .ok_or(GraphError::NoSuchNode(destination.index()))?;
                inner.add_edge(a, b, edge);
            }
        }

        tracing::trace!(
            ?interpretation,
            nodes = inner.node_count(),
            arcs = inner.edge_count(),
            "built arc graph"
        );
        Ok(ArcGraph {
            inner,
            index,
            interpretation,
        })
    }

    pub fn interpretation(&self) -> Interpretation {
        self.interpretation
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn arc_count(&self) -> usize {
        self.inner.edge_count()
    }

    fn node_index(&self, node: NodeId) -> GraphResult<NodeIndex> {
        self.index
            .get(&node)
            .copied()
            .ok_or(GraphError::NoSuchNode(node.index()))
    }

    /// Nodes one arc away from `node`, sorted.
    pub fn successors(&self, node: NodeId) -> GraphResult<Vec<NodeId>> {
        let idx = self.node_index(node)?;
        let mut out: Vec<NodeId> = self.inner.neighbors(idx).map(|n| self.inner[n]).collect();
        out.sort();
        out.dedup();
        Ok(out)
    }

    /// Every node reachable from `start`, `start` included, sorted.
    pub fn reachable_from(&self, start: NodeId) -> GraphResult<Vec<NodeId>> {
        let idx = self.node_index(start)?;
        let mut bfs = Bfs::new(&self.inner, idx);
        let mut reached = Vec::new();
        while let Some(n) = bfs.next(&self.inner) {
            reached.push(self.inner[n]);
        }
        reached.sort();
        Ok(reached)
    }

    /// Strongly connected components, each sorted, ordered by smallest member.
    pub fn strongly_connected_components(&self) -> Vec<Vec<NodeId>> {
        let mut components: Vec<Vec<NodeId>> = kosaraju_scc(&self.inner)
            .into_iter()
            .map(|component| {
                let mut nodes: Vec<NodeId> = component.into_iter().map(|n| self.inner[n]).collect();
                nodes.sort();
                nodes
            })
            .collect();
        components.sort();
        components
    }
}

/// Convenience for [`ArcGraph::build`] followed by [`ArcGraph::reachable_from`].
pub fn reachable_from<G: Graph>(
    graph: &G,
    start: NodeId,
    interpretation: Interpretation,
) -> GraphResult<Vec<NodeId>> {
    ArcGraph::build(graph, interpretation)?.reachable_from(start)
}

/// Convenience for [`ArcGraph::build`] followed by [`ArcGraph::strongly_connected_components`].
pub fn strongly_connected_components<G: Graph>(
    graph: &G,
    interpretation: Interpretation,
) -> GraphResult<Vec<Vec<NodeId>>> {
    Ok(ArcGraph::build(graph, interpretation)?.strongly_connected_components())
}
