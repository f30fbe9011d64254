//! Integration tests for Toposcope
//!
//! These tests drive the CLI end to end and check that the libraries work
//! together.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const REFERENCE_SCENE: &str = r#"
[graph]
kind = "directed"

[[graph.nodes]]
name = "a"
position = [1.0, 0.0, 0.0]

[[graph.nodes]]
name = "b"
position = [0.0, 1.0, 0.0]

[[graph.nodes]]
name = "c"
position = [0.0, 0.0, 0.0]

[[graph.nodes]]
name = "d"
position = [0.0, 0.0, 1.0]

[[graph.edges]]
source = "c"
destination = "a"
orientation = "directed"

[[graph.edges]]
source = "c"
destination = "b"
orientation = "undirected"

[[graph.edges]]
source = "c"
destination = "d"
orientation = "bidirectional"

[[graph.edges]]
source = "b"
destination = "d"
orientation = "reversed"

[[graph.edges]]
name = "loop"
source = "b"
destination = "b"
orientation = "directed"

[[node-groups]]
name = "hubs"
members = ["a", "c"]
mode = "sphere"
options = { color = 16711680 }

[[edge-groups]]
members = ["loop"]
mode = "arrow"
"#;

fn toposcope(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_toposcope"))
        .args(args)
        .output()
        .expect("Failed to execute toposcope")
}

fn write_scene(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "toposcope failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

/// Number of edges drawn as more than one polyline.
fn wrapped_edges(scene: &Value) -> usize {
    scene["edges"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|edge| edge["polylines"].as_array().unwrap().len() > 1)
        .count()
}

#[test]
fn test_version() {
    let output = toposcope(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("Toposcope v{}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_cli_help() {
    let output = toposcope(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("render"));
    assert!(stdout.contains("inspect"));
}

#[test]
fn test_render_toml_to_file() {
    let dir = TempDir::new().unwrap();
    let scene_path = write_scene(dir.path(), "scene.toml", REFERENCE_SCENE);
    let out_path = dir.path().join("scene.json");

    let output = toposcope(&[
        "render",
        "--config",
        scene_path.to_str().unwrap(),
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "render failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let document: Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(document["version"], env!("CARGO_PKG_VERSION"));
    assert!(document["generated_at"].as_str().is_some());

    let scene = &document["scene"];
    assert_eq!(scene["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(scene["edges"].as_array().unwrap().len(), 5);
    assert_eq!(scene["nodes"][0]["position"], serde_json::json!([1.0, 0.0, 0.0]));
    assert_eq!(wrapped_edges(scene), 0);

    // c -> a runs between the stored positions of c and a
    let first = &scene["edges"][0];
    assert_eq!(first["orientation"], "directed");
    assert_eq!(
        first["polylines"],
        serde_json::json!([[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]])
    );

    let hubs = &scene["node_groups"][0];
    assert_eq!(hubs["name"], "hubs");
    assert_eq!(hubs["display_mode"], "sphere");
    assert_eq!(hubs["items"], serde_json::json!([0, 2]));
    assert_eq!(hubs["display_options"]["color"], 16711680);
    assert_eq!(hubs["display_options"]["opacity"], 1.0);

    let arrows = &scene["edge_groups"][0];
    assert_eq!(arrows["display_mode"], "arrow");
    assert_eq!(arrows["items"], serde_json::json!([4]));
}

#[test]
fn test_render_json_torus_to_stdout() {
    let dir = TempDir::new().unwrap();
    let scene_path = write_scene(
        dir.path(),
        "torus.json",
        r#"{
            "graph": { "kind": "flat-torus", "dimensions": [4] },
            "mapper": { "kind": "flat-torus", "center": [0, 0, 0], "dimensions": [4, 1, 1] }
        }"#,
    );

    let output = toposcope(&["render", "--config", scene_path.to_str().unwrap()]);
    let document = stdout_json(&output);
    let scene = &document["scene"];
    assert_eq!(scene["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(scene["edges"].as_array().unwrap().len(), 4);
    // Only the edge from the last node back to the first wraps
    assert_eq!(wrapped_edges(scene), 1);
}

#[test]
fn test_render_yaml_with_periodic_box() {
    let dir = TempDir::new().unwrap();
    let scene_path = write_scene(
        dir.path(),
        "periodic.yaml",
        "
graph:
  kind: directed
  nodes:
    - name: left
      position: [9.0, 0.0, 0.0]
    - name: right
      position: [1.0, 0.0, 0.0]
  edges:
    - source: left
      destination: right
      orientation: directed
periodic:
  - center: [0.0, 0.0, 0.0]
    dimensions: [10.0, 10.0, 10.0]
",
    );

    let output = toposcope(&["render", "--config", scene_path.to_str().unwrap()]);
    let document = stdout_json(&output);
    let scene = &document["scene"];
    assert_eq!(wrapped_edges(scene), 1);

    let polylines = scene["edges"][0]["polylines"].as_array().unwrap();
    let length: f64 = polylines
        .iter()
        .map(|polyline| {
            let points = polyline.as_array().unwrap();
            let x0 = points[0][0].as_f64().unwrap();
            let x1 = points[1][0].as_f64().unwrap();
            (x1 - x0).abs()
        })
        .sum();
    assert!((length - 2.0).abs() < 1e-9);
}

#[test]
fn test_inspect_reports_counts() {
    let dir = TempDir::new().unwrap();
    let scene_path = write_scene(dir.path(), "scene.toml", REFERENCE_SCENE);

    let output = toposcope(&["inspect", "--config", scene_path.to_str().unwrap()]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("4 nodes and 5 edges"));
    assert!(stderr.contains("1 self-edges"));
    assert!(stderr.contains("strongly connected components"));
}

#[test]
fn test_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    let output = toposcope(&["render", "--config", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read scene file"));
}

#[test]
fn test_unknown_node_fails() {
    let dir = TempDir::new().unwrap();
    let scene_path = write_scene(
        dir.path(),
        "bad.toml",
        r#"
[graph]
kind = "directed"
nodes = [{ name = "a" }]
edges = [{ source = "a", destination = "ghost" }]
"#,
    );
    let output = toposcope(&["render", "--config", scene_path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown node `ghost`"));
}

#[test]
fn test_torus_mapper_rejects_directed_graph() {
    let dir = TempDir::new().unwrap();
    let scene_path = write_scene(
        dir.path(),
        "mismatch.toml",
        r#"
[graph]
kind = "directed"
nodes = [{ name = "a" }]

[mapper]
kind = "flat-torus"
center = [0.0, 0.0, 0.0]
dimensions = [1.0, 1.0, 1.0]
"#,
    );
    let output = toposcope(&["render", "--config", scene_path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("flat-torus mapper"));
}

/// The libraries compose without the CLI
#[test]
fn test_library_pipeline() {
    use toposcope_core::{DirectedGraph, EdgeOrientation, ElementData, Graph};
    use toposcope_mappers::{compose, DirectTopologyMapper, PeriodicBox, SceneSnapshot, TopologyMapper};

    let mut graph = DirectedGraph::new();
    let a = graph.new_node(ElementData::at([9.0, 0.0, 0.0])).unwrap();
    let b = graph.new_node(ElementData::at([1.0, 0.0, 0.0])).unwrap();
    graph.new_edge(a, b, EdgeOrientation::Directed).unwrap();

    let boxes = [PeriodicBox {
        center: [0.0; 3],
        dimensions: [10.0; 3],
        shifts: [0.0; 3],
    }];
    let source: Box<dyn TopologyMapper<DirectedGraph>> = Box::new(DirectTopologyMapper::new());
    let mapper = compose(&boxes, source);
    let scene = SceneSnapshot::capture(&graph, mapper.as_ref()).unwrap();
    assert_eq!(scene.nodes.len(), 2);
    assert_eq!(scene.unbroken_edges().count(), 0);
}
