//! The mapper contract: topology in, geometry out

use toposcope_core::{EdgeId, Graph, GraphResult, NodeId, Position};

/// Points along an edge. `None` is a break: nothing is drawn across it.
pub type EdgePath = Vec<Option<Position>>;

/// Places the nodes of a `G` in space and traces its edges.
///
/// Decorating mappers own their upstream mapper, so a chain is a nested value
/// whose shape is fixed at construction. Boxed and borrowed mappers are
/// mappers too, which lets a chain hold `Box<dyn TopologyMapper<G>>` links.
pub trait TopologyMapper<G: Graph> {
    fn node_to_position(&self, graph: &G, node: NodeId) -> GraphResult<Position>;

    fn edge_to_path(&self, graph: &G, edge: EdgeId) -> GraphResult<EdgePath>;
}

impl<G: Graph, M: TopologyMapper<G> + ?Sized> TopologyMapper<G> for Box<M> {
    fn node_to_position(&self, graph: &G, node: NodeId) -> GraphResult<Position> {
        (**self).node_to_position(graph, node)
    }

    fn edge_to_path(&self, graph: &G, edge: EdgeId) -> GraphResult<EdgePath> {
        (**self).edge_to_path(graph, edge)
    }
}

impl<G: Graph, M: TopologyMapper<G> + ?Sized> TopologyMapper<G> for &M {
    fn node_to_position(&self, graph: &G, node: NodeId) -> GraphResult<Position> {
        (**self).node_to_position(graph, node)
    }

    fn edge_to_path(&self, graph: &G, edge: EdgeId) -> GraphResult<EdgePath> {
        (**self).edge_to_path(graph, edge)
    }
}

/// Endpoint positions of `edge` as placed by `mapper`.
pub fn edge_endpoints<G, M>(mapper: &M, graph: &G, edge: EdgeId) -> GraphResult<(Position, Position)>
where
    G: Graph,
    M: TopologyMapper<G> + ?Sized,
{
    let p0 = mapper.node_to_position(graph, graph.edge_source(edge)?)?;
    let p1 = mapper.node_to_position(graph, graph.edge_destination(edge)?)?;
    Ok((p0, p1))
}
