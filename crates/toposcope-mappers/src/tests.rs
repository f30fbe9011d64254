//! Unit tests for toposcope-mappers

use toposcope_core::*;

use crate::*;

fn assert_close(actual: Position, expected: Position) {
    for i in 0..3 {
        assert!(
            (actual[i] - expected[i]).abs() < 1e-9,
            "{actual:?} != {expected:?}"
        );
    }
}

fn two_node_graph(p0: Position, p1: Position) -> (DirectedGraph, EdgeId) {
    let mut g = DirectedGraph::new();
    let a = g.new_node(ElementData::at(p0)).unwrap();
    let b = g.new_node(ElementData::at(p1)).unwrap();
    let e = g.new_edge(a, b, EdgeOrientation::Directed).unwrap();
    (g, e)
}

#[test]
fn test_direct_mapper_reads_positions() {
    let mut g = DirectedGraph::new();
    let placed = g.new_node(ElementData::at([1.0, 2.0, 3.0])).unwrap();
    let unplaced = g.new_node(ElementData::new()).unwrap();
    let e = g.new_edge(placed, unplaced, EdgeOrientation::Undirected).unwrap();

    let mapper = DirectTopologyMapper::new();
    assert_eq!(mapper.node_to_position(&g, placed).unwrap(), [1.0, 2.0, 3.0]);
    assert_eq!(mapper.node_to_position(&g, unplaced).unwrap(), [0.0; 3]);
    assert_eq!(
        mapper.edge_to_path(&g, e).unwrap(),
        vec![Some([1.0, 2.0, 3.0]), Some([0.0; 3])]
    );
    assert!(mapper.node_to_position(&g, NodeId(7)).is_err());
}

#[test]
fn test_flat_torus_wrap_path() {
    let torus = FlatTorus::new(vec![4]).unwrap();
    let mapper = FlatTorusTopologyMapper::new([0.0; 3], [4.0, 1.0, 1.0]);

    assert_eq!(mapper.node_to_position(&torus, NodeId(3)).unwrap(), [1.5, 0.0, 0.0]);
    assert_eq!(mapper.node_to_position(&torus, NodeId(0)).unwrap(), [-1.5, 0.0, 0.0]);

    let wrapping = torus.edge_at(&[3], 0).unwrap();
    assert_eq!(torus.edge_destination(wrapping).unwrap(), NodeId(0));
    assert_eq!(
        mapper.edge_to_path(&torus, wrapping).unwrap(),
        vec![
            Some([1.5, 0.0, 0.0]),
            Some([2.0, 0.0, 0.0]),
            None,
            Some([-2.0, 0.0, 0.0]),
            Some([-1.5, 0.0, 0.0]),
        ]
    );

    let plain = torus.edge_at(&[0], 0).unwrap();
    assert_eq!(
        mapper.edge_to_path(&torus, plain).unwrap(),
        vec![Some([-1.5, 0.0, 0.0]), Some([-0.5, 0.0, 0.0])]
    );
}

#[test]
fn test_flat_torus_shifts_move_the_seam() {
    let torus = FlatTorus::new(vec![4]).unwrap();
    let mut mapper = FlatTorusTopologyMapper::new([0.0; 3], [4.0, 1.0, 1.0]).with_shifts([1.7, 0.0, 0.0]);
    assert_eq!(mapper.shifts(), [1, 0, 0]);
    assert_eq!(mapper.node_to_position(&torus, NodeId(3)).unwrap()[0], -1.5);

    // 3 → 0 no longer crosses the seam, 2 → 3 does.
    assert_eq!(mapper.edge_to_path(&torus, EdgeId(3)).unwrap().len(), 2);
    assert_eq!(mapper.edge_to_path(&torus, EdgeId(2)).unwrap().len(), 5);

    mapper.set_shift_component(0, -0.5).unwrap();
    assert_eq!(mapper.shift_component(0).unwrap(), -1);
    assert_eq!(mapper.node_to_position(&torus, NodeId(0)).unwrap()[0], 1.5);
}

#[test]
fn test_flat_torus_huge_shifts_still_wrap() {
    let torus = FlatTorus::new(vec![4]).unwrap();
    // Saturates to i64::MAX, which is 3 modulo 4.
    let mapper = FlatTorusTopologyMapper::new([0.0; 3], [4.0, 1.0, 1.0]).with_shifts([1e300, 0.0, 0.0]);
    assert_eq!(mapper.shifts()[0], i64::MAX);
    assert_eq!(mapper.node_to_position(&torus, NodeId(3)).unwrap()[0], 0.5);
    assert_eq!(mapper.edge_to_path(&torus, EdgeId(0)).unwrap().len(), 5);
    assert_eq!(mapper.edge_to_path(&torus, EdgeId(1)).unwrap().len(), 2);

    // Saturates to i64::MIN, a multiple of 4.
    let mapper = mapper.with_shifts([-1e300, 0.0, 0.0]);
    assert_eq!(mapper.node_to_position(&torus, NodeId(3)).unwrap()[0], 1.5);
}

#[test]
fn test_flat_torus_singular_axis_self_wrap() {
    let torus = FlatTorus::new(vec![4, 1]).unwrap();
    let mapper = FlatTorusTopologyMapper::new([0.0; 3], [4.0, 2.0, 1.0]);
    let edge = torus.edge_at(&[0, 0], 1).unwrap();
    assert_eq!(torus.edge_source(edge).unwrap(), torus.edge_destination(edge).unwrap());

    let path = mapper.edge_to_path(&torus, edge).unwrap();
    assert_eq!(
        path,
        vec![
            Some([-1.5, 0.0, 0.0]),
            Some([-1.5, 1.0, 0.0]),
            None,
            Some([-1.5, -1.0, 0.0]),
            Some([-1.5, 0.0, 0.0]),
        ]
    );
}

#[test]
fn test_flat_torus_missing_and_extra_axes() {
    let torus = FlatTorus::new(vec![2]).unwrap();
    let mapper = FlatTorusTopologyMapper::new([1.0, 2.0, 3.0], [2.0, 4.0, 6.0]);
    assert_eq!(mapper.node_to_position(&torus, NodeId(0)).unwrap(), [0.5, 2.0, 3.0]);
    assert_eq!(mapper.node_to_position(&torus, NodeId(1)).unwrap(), [1.5, 2.0, 3.0]);

    let hyper = FlatTorus::new(vec![2, 2, 2, 2]).unwrap();
    let mapper = FlatTorusTopologyMapper::new([0.0; 3], [2.0; 3]);
    let along_fourth = hyper.edge_at(&[0, 0, 0, 1], 3).unwrap();
    let path = mapper.edge_to_path(&hyper, along_fourth).unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path[0], path[1]);
}

#[test]
fn test_box_accessors() {
    let mut mapper = FlatTorusTopologyMapper::new([0.0; 3], [-4.0, 2.0, -1.0]);
    assert_eq!(mapper.dimensions(), [4.0, 2.0, 1.0]);
    mapper.bounds_mut().set_dimension_component(1, -3.0).unwrap();
    assert_eq!(mapper.bounds().dimension_component(1).unwrap(), 3.0);
    mapper.bounds_mut().set_center_component(2, 5.0).unwrap();
    assert_eq!(mapper.center(), [0.0, 0.0, 5.0]);
    assert_eq!(
        mapper.bounds().center_component(3),
        Err(GraphError::IndexOutOfBounds { index: 3, len: 3 })
    );
    assert!(mapper.set_shift_component(3, 1.0).is_err());
    assert_eq!(mapper.bounds().lower_corner(), [-2.0, -1.5, 4.5]);
}

#[test]
fn test_periodic_wrap_takes_shortest_image() {
    let (g, e) = two_node_graph([9.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
    let mapper = PeriodicBoundaryTopologyMapper::new(DirectTopologyMapper, [0.0; 3], [10.0; 3]);

    let path = mapper.edge_to_path(&g, e).unwrap();
    assert_eq!(
        path,
        vec![
            Some([4.0, -5.0, -5.0]),
            Some([5.0, -5.0, -5.0]),
            None,
            Some([-5.0, -5.0, -5.0]),
            Some([-4.0, -5.0, -5.0]),
        ]
    );
    assert_eq!(path_segments(&path).len(), 2);
    assert!((path_length(&path) - 2.0).abs() < 1e-12);
}

#[test]
fn test_periodic_plain_edge() {
    let (g, e) = two_node_graph([1.0, 0.0, 0.0], [3.0, 0.0, 0.0]);
    let mapper = PeriodicBoundaryTopologyMapper::new(DirectTopologyMapper, [0.0; 3], [10.0; 3]);
    assert_eq!(
        mapper.edge_to_path(&g, e).unwrap(),
        vec![Some([-4.0, -5.0, -5.0]), Some([-2.0, -5.0, -5.0])]
    );
}

#[test]
fn test_periodic_diagonal_wrap_through_corner() {
    let (g, e) = two_node_graph([9.0, 9.0, 0.0], [1.0, 1.0, 0.0]);
    let mapper = PeriodicBoundaryTopologyMapper::new(DirectTopologyMapper, [5.0, 5.0, 5.0], [10.0; 3]);

    let path = mapper.edge_to_path(&g, e).unwrap();
    let segments = path_segments(&path);
    // Both axes are crossed at the same corner, so only two legs are drawn.
    assert_eq!(segments.len(), 2);
    assert_close(segments[0][0], [9.0, 9.0, 0.0]);
    assert_close(segments[0][1], [10.0, 10.0, 0.0]);
    assert_close(segments[1][0], [0.0, 0.0, 0.0]);
    assert_close(segments[1][1], [1.0, 1.0, 0.0]);
    assert!((path_length(&path) - 2.0 * 2f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_periodic_two_axis_wrap() {
    let (g, e) = two_node_graph([9.0, 2.0, 0.0], [1.0, 9.0, 0.0]);
    let mapper = PeriodicBoundaryTopologyMapper::new(DirectTopologyMapper, [5.0, 5.0, 5.0], [10.0; 3]);

    let path = mapper.edge_to_path(&g, e).unwrap();
    let segments = path_segments(&path);
    // Leaves through x = 10 first, then through y = 0.
    assert_eq!(segments.len(), 3);
    assert_close(segments[0][0], [9.0, 2.0, 0.0]);
    assert_close(segments[0][1], [10.0, 0.5, 0.0]);
    assert_close(segments[1][0], [0.0, 0.5, 0.0]);
    assert_close(segments[1][1], [1.0 / 3.0, 0.0, 0.0]);
    assert_close(segments[2][0], [1.0 / 3.0, 10.0, 0.0]);
    assert_close(segments[2][1], [1.0, 9.0, 0.0]);
    assert!((path_length(&path) - 13f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_periodic_node_wrapping_and_shifts() {
    let (g, _) = two_node_graph([12.0, -1.0, 0.0], [0.0; 3]);
    let mut mapper = PeriodicBoundaryTopologyMapper::new(DirectTopologyMapper, [0.0, 7.0, 0.0], [10.0, 0.0, 10.0]);
    assert_close(mapper.node_to_position(&g, NodeId(0)).unwrap(), [-3.0, 7.0, -5.0]);

    mapper.set_shift_component(0, 3.0).unwrap();
    assert_eq!(mapper.shifts(), [3.0, 0.0, 0.0]);
    assert_close(mapper.node_to_position(&g, NodeId(0)).unwrap(), [0.0, 7.0, -5.0]);
    assert!(mapper.shift_component(5).is_err());
}

#[test]
fn test_periodic_coincident_endpoints() {
    let mut g = DirectedGraph::new();
    let a = g.new_node(ElementData::at([2.0, 2.0, 2.0])).unwrap();
    let e = g.new_edge(a, a, EdgeOrientation::Directed).unwrap();
    let mapper = PeriodicBoundaryTopologyMapper::new(DirectTopologyMapper, [0.0; 3], [10.0; 3]);
    let path = mapper.edge_to_path(&g, e).unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path[0], path[1]);
    assert!(path.iter().all(Option::is_some));
}

#[test]
fn test_periodic_input_is_replaceable() {
    let inner = FlatTorusTopologyMapper::new([0.0; 3], [4.0, 1.0, 1.0]);
    let mut mapper = PeriodicBoundaryTopologyMapper::new(inner, [0.0; 3], [2.0, 1.0, 1.0]);
    let torus = FlatTorus::new(vec![4]).unwrap();

    // Upstream places node 0 at x = -1.5; the 2-wide box folds it to -0.5.
    assert_close(mapper.node_to_position(&torus, NodeId(0)).unwrap(), [-0.5, -0.5, -0.5]);

    let old = mapper.set_input(FlatTorusTopologyMapper::new([0.0; 3], [8.0, 1.0, 1.0]));
    assert_eq!(old, inner);
    assert_eq!(mapper.input().dimensions(), [8.0, 1.0, 1.0]);
    mapper.input_mut().set_shifts([1.0, 0.0, 0.0]);
    assert_eq!(mapper.into_input().shifts(), [1, 0, 0]);
}

#[test]
fn test_compose_puts_first_box_outermost() {
    let (g, _) = two_node_graph([5.0, 0.0, 0.0], [0.0; 3]);
    let wide = PeriodicBox {
        center: [0.0; 3],
        dimensions: [10.0; 3],
        shifts: [0.0; 3],
    };
    let narrow = PeriodicBox {
        center: [0.0; 3],
        dimensions: [4.0; 3],
        shifts: [0.0; 3],
    };

    let chain = compose::<DirectedGraph>(&[wide.clone(), narrow.clone()], Box::new(DirectTopologyMapper));
    let nested = wide.wrap(narrow.wrap(DirectTopologyMapper));
    let expected = nested.node_to_position(&g, NodeId(0)).unwrap();
    assert_eq!(chain.node_to_position(&g, NodeId(0)).unwrap(), expected);
    assert_close(expected, [4.0, 3.0, 3.0]);

    let reversed = compose::<DirectedGraph>(&[narrow, wide], Box::new(DirectTopologyMapper));
    assert_close(reversed.node_to_position(&g, NodeId(0)).unwrap(), [-2.0, 1.0, 1.0]);

    let bare = compose::<DirectedGraph>(&[], Box::new(DirectTopologyMapper));
    assert_eq!(bare.node_to_position(&g, NodeId(0)).unwrap(), [5.0, 0.0, 0.0]);
}

#[test]
fn test_periodic_box_from_json() {
    let parsed: PeriodicBox =
        serde_json::from_str(r#"{ "center": [0, 0, 0], "dimensions": [10, 10, 10] }"#).unwrap();
    assert_eq!(parsed.shifts, [0.0; 3]);
    assert_eq!(parsed.dimensions, [10.0; 3]);
}

#[test]
fn test_scene_capture_on_torus() {
    let torus = FlatTorus::new(vec![4]).unwrap();
    let mapper = FlatTorusTopologyMapper::new([0.0; 3], [4.0, 1.0, 1.0]);
    let dyn_mapper: &dyn TopologyMapper<FlatTorus> = &mapper;
    let scene = SceneSnapshot::capture(&torus, dyn_mapper).unwrap();

    assert_eq!(scene.nodes.len(), 4);
    assert_eq!(scene.edges.len(), 4);
    assert_eq!(scene.unbroken_edges().count(), 3);
    let wrapping = &scene.edges[3];
    assert_eq!((wrapping.source, wrapping.destination), (NodeId(3), NodeId(0)));
    assert_eq!(wrapping.polylines.len(), 2);
    assert_eq!(wrapping.orientation, EdgeOrientation::Undirected);
    assert!(scene.nodes.iter().all(|n| n.color.is_none()));
}

#[test]
fn test_scene_colors_and_groups() {
    let mut g = DirectedGraph::new();
    let hot = g
        .new_node(ElementData::at([1.0, 0.0, 0.0]).with_attribute("heat", 1.0))
        .unwrap();
    let cold = g
        .new_node(ElementData::new().with_attribute("heat", 0.0))
        .unwrap();
    let blank = g.new_node(ElementData::new()).unwrap();
    g.new_edge(hot, cold, EdgeOrientation::Directed).unwrap();

    let transfer = |v: f64| Some(Rgb::new(v, 0.0, 1.0 - v));
    let mut scene = SceneSnapshot::capture_with_colors(&g, &DirectTopologyMapper, "heat", &transfer).unwrap();
    assert_eq!(scene.nodes[hot.index()].color, Some(Rgb([1.0, 0.0, 0.0])));
    assert_eq!(scene.nodes[cold.index()].color, Some(Rgb([0.0, 0.0, 1.0])));
    assert_eq!(scene.nodes[blank.index()].color, None);

    let group = NodeGroup::new([hot, blank], NodeDisplayMode::Sphere, DisplayOptions::new());
    scene.add_node_group(Some("highlight".into()), &group);
    let edges = EdgeGroup::default();
    scene.add_edge_group(None, &edges);

    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["node_groups"][0]["name"], "highlight");
    assert_eq!(json["node_groups"][0]["display_mode"], "sphere");
    assert_eq!(json["node_groups"][0]["items"], serde_json::json!([0, 2]));
    assert_eq!(json["edge_groups"][0]["display_mode"], "line");
    assert_eq!(json["edges"][0]["orientation"], "directed");
    assert!(json["nodes"][2].get("color").is_none());

    let back: SceneSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back.nodes, scene.nodes);
    assert_eq!(back.edges, scene.edges);
}
