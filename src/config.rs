//! Scene description files
//!
//! A scene file names a graph, the mapper that places it, an optional chain
//! of periodic boxes and the display groups to hand to the renderer. TOML is
//! the default format; `.json`, `.yaml` and `.yml` files are parsed by
//! extension.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use toposcope_core::{
    DirectedGraph, DisplayOptions, EdgeDisplayMode, EdgeId, EdgeOrientation, ElementData,
    FlatTorus, Graph, NodeDisplayMode, NodeId, Position,
};
use toposcope_mappers::PeriodicBox;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneConfig {
    pub graph: GraphConfig,
    #[serde(default)]
    pub mapper: MapperConfig,
    /// Head of the decorator chain first.
    #[serde(default)]
    pub periodic: Vec<PeriodicBox>,
    #[serde(default)]
    pub node_groups: Vec<GroupConfig<NodeDisplayMode>>,
    #[serde(default)]
    pub edge_groups: Vec<GroupConfig<EdgeDisplayMode>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GraphConfig {
    Directed {
        #[serde(default)]
        nodes: Vec<NodeConfig>,
        #[serde(default)]
        edges: Vec<EdgeConfig>,
    },
    FlatTorus {
        dimensions: Vec<usize>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub name: String,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub orientation: OrientationConfig,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

/// Orientation by name (`directed`) or by bitmask value (`2`).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum OrientationConfig {
    Name(EdgeOrientation),
    Bits(u8),
}

impl Default for OrientationConfig {
    fn default() -> Self {
        OrientationConfig::Name(EdgeOrientation::default())
    }
}

impl OrientationConfig {
    pub fn resolve(self) -> anyhow::Result<EdgeOrientation> {
        match self {
            OrientationConfig::Name(orientation) => Ok(orientation),
            OrientationConfig::Bits(bits) => Ok(EdgeOrientation::from_bits(bits)?),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MapperConfig {
    #[default]
    Direct,
    FlatTorus {
        center: Position,
        dimensions: Position,
        #[serde(default)]
        shifts: [f64; 3],
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "M: Deserialize<'de> + Default"))]
pub struct GroupConfig<M> {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberRef>,
    #[serde(default)]
    pub mode: M,
    #[serde(default)]
    pub options: DisplayOptions,
}

/// A group member, either by name or by raw handle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MemberRef {
    Index(usize),
    Name(String),
}

/// A graph built from a scene file, ready to be mapped.
#[derive(Debug)]
pub enum SceneGraph {
    Directed(DirectedGraph, Names),
    FlatTorus(FlatTorus),
}

/// Names given to nodes and edges in the scene file.
#[derive(Debug, Default)]
pub struct Names {
    nodes: HashMap<String, NodeId>,
    edges: HashMap<String, EdgeId>,
}

impl Names {
    pub fn node(&self, name: &str) -> anyhow::Result<NodeId> {
        self.nodes
            .get(name)
            .copied()
            .with_context(|| format!("unknown node `{}`", name))
    }

    pub fn edge(&self, name: &str) -> anyhow::Result<EdgeId> {
        self.edges
            .get(name)
            .copied()
            .with_context(|| format!("unknown edge `{}`", name))
    }

    pub fn resolve_nodes<G: Graph>(&self, graph: &G, members: &[MemberRef]) -> anyhow::Result<Vec<NodeId>> {
        members
            .iter()
            .map(|member| match member {
                MemberRef::Name(name) => self.node(name),
                MemberRef::Index(index) => {
                    let node = NodeId(*index);
                    graph.node_data(node)?;
                    Ok(node)
                }
            })
            .collect()
    }

    pub fn resolve_edges<G: Graph>(&self, graph: &G, members: &[MemberRef]) -> anyhow::Result<Vec<EdgeId>> {
        members
            .iter()
            .map(|member| match member {
                MemberRef::Name(name) => self.edge(name),
                MemberRef::Index(index) => {
                    let edge = EdgeId(*index);
                    graph.edge_data(edge)?;
                    Ok(edge)
                }
            })
            .collect()
    }
}

impl SceneConfig {
    /// Load a scene file, picking the parser from the extension.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        let format = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
        Self::parse(&text, format).with_context(|| format!("Invalid scene file {}", path.display()))
    }

    pub fn parse(text: &str, format: &str) -> anyhow::Result<Self> {
        let config = match format {
            "json" => serde_json::from_str(text)?,
            "yaml" | "yml" => serde_yaml::from_str(text)?,
            _ => toml::from_str(text)?,
        };
        Ok(config)
    }

    pub fn build_graph(&self) -> anyhow::Result<SceneGraph> {
        match &self.graph {
            GraphConfig::Directed { nodes, edges } => {
                let mut graph = DirectedGraph::new();
                let mut names = Names::default();
                for node in nodes {
                    let data = ElementData {
                        position: node.position,
                        attributes: node.attributes.clone(),
                    };
                    let id = graph.new_node(data)?;
                    if names.nodes.insert(node.name.clone(), id).is_some() {
                        bail!("duplicate node name `{}`", node.name);
                    }
                }
                for edge in edges {
                    let source = names.node(&edge.source)?;
                    let destination = names.node(&edge.destination)?;
                    let id = graph.new_edge(source, destination, edge.orientation.resolve()?)?;
                    graph.edge_data_mut(id)?.attributes = edge.attributes.clone();
                    if let Some(name) = &edge.name {
                        if names.edges.insert(name.clone(), id).is_some() {
                            bail!("duplicate edge name `{}`", name);
                        }
                    }
                }
                Ok(SceneGraph::Directed(graph, names))
            }
            GraphConfig::FlatTorus { dimensions } => {
                Ok(SceneGraph::FlatTorus(FlatTorus::new(dimensions.clone())?))
            }
        }
    }
}
