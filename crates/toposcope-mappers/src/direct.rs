use toposcope_core::{EdgeId, Graph, GraphResult, NodeId, Position};

use crate::mapper::{edge_endpoints, EdgePath, TopologyMapper};

/// Uses each node's stored `position`, or the origin when it has none.
/// Edges are straight two-point lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectTopologyMapper;

impl DirectTopologyMapper {
    pub fn new() -> Self {
        DirectTopologyMapper
    }
}

impl<G: Graph> TopologyMapper<G> for DirectTopologyMapper {
    fn node_to_position(&self, graph: &G, node: NodeId) -> GraphResult<Position> {
        Ok(graph.node_data(node)?.position.unwrap_or([0.0; 3]))
    }

    fn edge_to_path(&self, graph: &G, edge: EdgeId) -> GraphResult<EdgePath> {
        let (p0, p1) = edge_endpoints(self, graph, edge)?;
        Ok(vec![Some(p0), Some(p1)])
    }
}
