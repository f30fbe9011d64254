//! Renderer-facing snapshot of a mapped graph

use serde::{Deserialize, Serialize};
use toposcope_core::{
    ColorTransfer, DisplayGroup, DisplayMode, DisplayOptions, EdgeGroup, EdgeId, EdgeOrientation,
    Graph, GraphResult, Handle, NodeGroup, NodeId, Position, Rgb,
};
use tracing::debug;

use crate::mapper::TopologyMapper;
use crate::path::path_segments;

/// Everything a renderer needs to draw one graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_groups: Vec<GroupSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edge_groups: Vec<GroupSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub id: EdgeId,
    pub source: NodeId,
    pub destination: NodeId,
    pub orientation: EdgeOrientation,
    /// The edge path split at its breaks; each polyline is drawn on its own.
    pub polylines: Vec<Vec<Position>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub display_mode: String,
    pub display_options: DisplayOptions,
    pub items: Vec<usize>,
}

impl GroupSnapshot {
    pub fn capture<H: Handle, M: DisplayMode>(name: Option<String>, group: &DisplayGroup<H, M>) -> Self {
        GroupSnapshot {
            name,
            display_mode: group.display_mode().name().to_string(),
            display_options: group.display_options().clone(),
            items: group.items().items().map(Handle::raw).collect(),
        }
    }
}

impl SceneSnapshot {
    /// Map every node and edge of `graph` through `mapper`.
    pub fn capture<G, M>(graph: &G, mapper: &M) -> GraphResult<Self>
    where
        G: Graph,
        M: TopologyMapper<G> + ?Sized,
    {
        Self::capture_inner(graph, mapper, |_| Ok(None))
    }

    /// As [`SceneSnapshot::capture`], coloring each node by passing its
    /// `attribute` scalar through `transfer`. Nodes without the attribute stay uncolored.
    pub fn capture_with_colors<G, M>(
        graph: &G,
        mapper: &M,
        attribute: &str,
        transfer: &dyn ColorTransfer,
    ) -> GraphResult<Self>
    where
        G: Graph,
        M: TopologyMapper<G> + ?Sized,
    {
        Self::capture_inner(graph, mapper, |node| {
            Ok(graph
                .node_data(node)?
                .scalar(attribute)
                .and_then(|value| transfer.compute_color(value)))
        })
    }

    fn capture_inner<G, M>(
        graph: &G,
        mapper: &M,
        color: impl Fn(NodeId) -> GraphResult<Option<Rgb>>,
    ) -> GraphResult<Self>
    where
        G: Graph,
        M: TopologyMapper<G> + ?Sized,
    {
        let nodes = graph
            .node_ids()
            .map(|id| {
                Ok(NodeSnapshot {
                    id,
                    position: mapper.node_to_position(graph, id)?,
                    color: color(id)?,
                })
            })
            .collect::<GraphResult<Vec<_>>>()?;

        let edges = graph
            .edge_ids()
            .map(|id| {
                let ends = graph.edge_ends(id)?;
                let path = mapper.edge_to_path(graph, id)?;
                Ok(EdgeSnapshot {
                    id,
                    source: ends.source,
                    destination: ends.destination,
                    orientation: ends.orientation,
                    polylines: path_segments(&path),
                })
            })
            .collect::<GraphResult<Vec<_>>>()?;

        debug!(nodes = nodes.len(), edges = edges.len(), "captured scene");
        Ok(SceneSnapshot {
            nodes,
            edges,
            node_groups: Vec::new(),
            edge_groups: Vec::new(),
        })
    }

    pub fn add_node_group(&mut self, name: Option<String>, group: &NodeGroup) {
        self.node_groups.push(GroupSnapshot::capture(name, group));
    }

    pub fn add_edge_group(&mut self, name: Option<String>, group: &EdgeGroup) {
        self.edge_groups.push(GroupSnapshot::capture(name, group));
    }

    /// Edges drawn as a single polyline.
    pub fn unbroken_edges(&self) -> impl Iterator<Item = &EdgeSnapshot> + '_ {
        self.edges.iter().filter(|edge| edge.polylines.len() == 1)
    }
}
