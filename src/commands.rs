//! CLI command implementations

use anyhow::{bail, Context};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use toposcope_core::{ArcGraph, DirectedGraph, EdgeGroup, FlatTorus, Graph, Interpretation, NodeGroup};
use toposcope_mappers::{
    compose, DirectTopologyMapper, FlatTorusTopologyMapper, SceneSnapshot, TopologyMapper,
};

use crate::config::{MapperConfig, Names, SceneConfig, SceneGraph};

/// What `render` writes: the scene plus where it came from.
#[derive(Debug, Serialize)]
struct RenderOutput<'a> {
    version: &'static str,
    generated_at: String,
    scene: &'a SceneSnapshot,
}

pub fn render(config_path: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    tracing::info!("Rendering scene: {}", config_path.display());

    let config = SceneConfig::load(&config_path)?;
    let scene = match config.build_graph()? {
        SceneGraph::Directed(graph, names) => {
            let source: Box<dyn TopologyMapper<DirectedGraph>> = match &config.mapper {
                MapperConfig::Direct => Box::new(DirectTopologyMapper::new()),
                MapperConfig::FlatTorus { .. } => {
                    bail!("the flat-torus mapper only places flat-torus graphs")
                }
            };
            render_with(&config, &graph, &names, source)?
        }
        SceneGraph::FlatTorus(torus) => {
            let source: Box<dyn TopologyMapper<FlatTorus>> = match &config.mapper {
                MapperConfig::Direct => Box::new(DirectTopologyMapper::new()),
                MapperConfig::FlatTorus {
                    center,
                    dimensions,
                    shifts,
                } => Box::new(FlatTorusTopologyMapper::new(*center, *dimensions).with_shifts(*shifts)),
            };
            render_with(&config, &torus, &Names::default(), source)?
        }
    };

    tracing::info!(
        "Mapped {} nodes, {} edges ({} wrapped)",
        scene.nodes.len(),
        scene.edges.len(),
        scene.edges.len() - scene.unbroken_edges().count()
    );

    let document = RenderOutput {
        version: env!("CARGO_PKG_VERSION"),
        generated_at: chrono::Utc::now().to_rfc3339(),
        scene: &scene,
    };
    let json = serde_json::to_string_pretty(&document)?;

    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("Failed to write scene to {}", path.display()))?;
            tracing::info!("Scene written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Run `source` through the periodic chain and capture the scene with its groups.
fn render_with<G>(
    config: &SceneConfig,
    graph: &G,
    names: &Names,
    source: Box<dyn TopologyMapper<G>>,
) -> anyhow::Result<SceneSnapshot>
where
    G: Graph + 'static,
{
    if !config.periodic.is_empty() {
        tracing::debug!("Wrapping mapper in {} periodic boxes", config.periodic.len());
    }
    let mapper = compose(&config.periodic, source);
    let mut scene = SceneSnapshot::capture(graph, mapper.as_ref())?;

    for group in &config.node_groups {
        let items = names.resolve_nodes(graph, &group.members)?;
        let group_data = NodeGroup::new(items, group.mode, group.options.clone());
        scene.add_node_group(group.name.clone(), &group_data);
    }
    for group in &config.edge_groups {
        let items = names.resolve_edges(graph, &group.members)?;
        let group_data = EdgeGroup::new(items, group.mode, group.options.clone());
        scene.add_edge_group(group.name.clone(), &group_data);
    }
    Ok(scene)
}

pub fn inspect(config_path: PathBuf) -> anyhow::Result<()> {
    tracing::info!("Inspecting scene: {}", config_path.display());

    let config = SceneConfig::load(&config_path)?;
    match config.build_graph()? {
        SceneGraph::Directed(graph, _) => inspect_graph("directed", &graph),
        SceneGraph::FlatTorus(torus) => {
            tracing::info!("Torus dimensions: {:?}", torus.dimensions());
            inspect_graph("flat-torus", &torus)
        }
    }
}

fn inspect_graph<G: Graph>(kind: &str, graph: &G) -> anyhow::Result<()> {
    tracing::info!(
        "Graph ({}) has {} nodes and {} edges",
        kind,
        graph.number_of_nodes(),
        graph.number_of_edges()
    );

    let mut self_edges = 0;
    for edge in graph.edge_ids() {
        let ends = graph.edge_ends(edge)?;
        if ends.source == ends.destination {
            self_edges += 1;
        }
    }
    tracing::info!("{} self-edges", self_edges);

    for interpretation in [Interpretation::Canonical, Interpretation::Symmetrical] {
        let arcs = ArcGraph::build(graph, interpretation)?;
        let components = arcs.strongly_connected_components();
        let largest = components.iter().map(Vec::len).max().unwrap_or(0);
        tracing::info!(
            "{:?}: {} arcs, {} strongly connected components (largest has {} nodes)",
            interpretation,
            arcs.arc_count(),
            components.len(),
            largest
        );
        for component in components.iter().filter(|c| c.len() > 1) {
            let members: Vec<String> = component.iter().map(ToString::to_string).collect();
            tracing::debug!("{:?} component: {}", interpretation, members.join(" "));
        }
    }
    Ok(())
}
