//! Periodic boundary decorator
//!
//! Wraps whatever an upstream mapper produces into a box with periodic
//! boundaries. Edges are routed along the shortest periodic image: an edge
//! whose endpoints lie more than half a box apart along some axis leaves
//! through one face and re-enters through the opposite one. The route is
//! found by marching a ray from the source through the box, hopping to the
//! opposite face at each boundary hit, and emitting one segment per leg.

use serde::{Deserialize, Serialize};
use toposcope_core::{EdgeId, Graph, GraphResult, NodeId, Position};
use tracing::trace;

use crate::bounds::{axis, BoundingBox};
use crate::mapper::{edge_endpoints, EdgePath, TopologyMapper};

/// Below this, a length or displacement counts as zero.
const EPSILON: f64 = 1e-8;

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicBoundaryTopologyMapper<M> {
    input: M,
    bounds: BoundingBox,
    shifts: Position,
}

impl<M> PeriodicBoundaryTopologyMapper<M> {
    pub fn new(input: M, center: Position, dimensions: Position) -> Self {
        PeriodicBoundaryTopologyMapper {
            input,
            bounds: BoundingBox::new(center, dimensions),
            shifts: [0.0; 3],
        }
    }

    pub fn with_shifts(mut self, shifts: Position) -> Self {
        self.shifts = shifts;
        self
    }

    /// The upstream mapper.
    pub fn input(&self) -> &M {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut M {
        &mut self.input
    }

    /// Replace the upstream mapper, returning the old one.
    pub fn set_input(&mut self, input: M) -> M {
        std::mem::replace(&mut self.input, input)
    }

    pub fn into_input(self) -> M {
        self.input
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn bounds_mut(&mut self) -> &mut BoundingBox {
        &mut self.bounds
    }

    pub fn center(&self) -> Position {
        self.bounds.center()
    }

    pub fn dimensions(&self) -> Position {
        self.bounds.dimensions()
    }

    pub fn shifts(&self) -> Position {
        self.shifts
    }

    pub fn set_shifts(&mut self, shifts: Position) {
        self.shifts = shifts;
    }

    pub fn shift_component(&self, i: usize) -> GraphResult<f64> {
        Ok(self.shifts[axis(i)?])
    }

    pub fn set_shift_component(&mut self, i: usize, x: f64) -> GraphResult<()> {
        self.shifts[axis(i)?] = x;
        Ok(())
    }

    /// World position to `[0, dimensions)` box coordinates. Degenerate axes collapse to 0.
    fn to_local(&self, p: Position) -> Position {
        let lower = self.bounds.lower_corner();
        let dims = self.bounds.dimensions();
        std::array::from_fn(|i| {
            if dims[i] < EPSILON {
                0.0
            } else {
                (p[i] - lower[i]).rem_euclid(dims[i])
            }
        })
    }

    fn to_world(&self, p: Position) -> Position {
        let lower = self.bounds.lower_corner();
        std::array::from_fn(|i| p[i] + lower[i])
    }

    /// Route from `p0` to `p1` (box coordinates) through the periodic box.
    fn trace(&self, p0: Position, p1: Position) -> EdgePath {
        let dims = self.bounds.dimensions();

        let mut delta = [0.0; 3];
        let mut wrappings = 0;
        for i in 0..3 {
            delta[i] = p1[i] - p0[i];
            if delta[i].abs() > 0.5 * dims[i] {
                if p0[i] < p1[i] {
                    delta[i] -= dims[i];
                } else {
                    delta[i] += dims[i];
                }
                wrappings += 1;
            }
        }

        let norm = delta.iter().map(|d| d * d).sum::<f64>().sqrt();
        if norm < EPSILON {
            return vec![Some(p0), Some(p1)];
        }
        let direction = delta.map(|d| d / norm);
        trace!(wrappings, ?direction, "tracing periodic edge");

        let mut path: EdgePath = Vec::new();
        let mut anchor = p0;
        let mut tracer = p0;
        for _ in 0..wrappings {
            // First face the ray reaches; the lowest axis wins a tie.
            let mut hit: Option<(usize, f64)> = None;
            for i in 0..3 {
                if direction[i].abs() < EPSILON {
                    continue;
                }
                let face = if direction[i] > 0.0 { dims[i] } else { 0.0 };
                let factor = (face - tracer[i]) / direction[i];
                if hit.is_none_or(|(_, min)| min > factor) {
                    hit = Some((i, factor));
                }
            }
            let Some((i, factor)) = hit else { break };

            if factor.abs() >= EPSILON {
                for (t, d) in tracer.iter_mut().zip(direction) {
                    *t += d * factor;
                }
                if !path.is_empty() {
                    path.push(None);
                }
                path.push(Some(anchor));
                path.push(Some(tracer));
            }

            tracer[i] = if direction[i] > 0.0 { 0.0 } else { dims[i] };
            anchor = tracer;
        }

        if !path.is_empty() {
            path.push(None);
        }
        path.push(Some(anchor));
        path.push(Some(p1));
        path
    }
}

impl<G, M> TopologyMapper<G> for PeriodicBoundaryTopologyMapper<M>
where
    G: Graph,
    M: TopologyMapper<G>,
{
    fn node_to_position(&self, graph: &G, node: NodeId) -> GraphResult<Position> {
        let raw = self.input.node_to_position(graph, node)?;
        let dims = self.bounds.dimensions();
        let center = self.bounds.center();
        Ok(std::array::from_fn(|i| {
            let x = raw[i] + self.shifts[i];
            let wrapped = if dims[i] < EPSILON { 0.0 } else { x.rem_euclid(dims[i]) };
            wrapped + center[i] - 0.5 * dims[i]
        }))
    }

    fn edge_to_path(&self, graph: &G, edge: EdgeId) -> GraphResult<EdgePath> {
        let (p0, p1) = edge_endpoints(self, graph, edge)?;
        let path = self.trace(self.to_local(p0), self.to_local(p1));
        Ok(path
            .into_iter()
            .map(|point| point.map(|p| self.to_world(p)))
            .collect())
    }
}

/// Serializable description of one periodic box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicBox {
    pub center: Position,
    pub dimensions: Position,
    #[serde(default)]
    pub shifts: Position,
}

impl PeriodicBox {
    /// Decorate `input` with this box.
    pub fn wrap<M>(&self, input: M) -> PeriodicBoundaryTopologyMapper<M> {
        PeriodicBoundaryTopologyMapper::new(input, self.center, self.dimensions).with_shifts(self.shifts)
    }
}

/// Build a decorator chain on top of `source`.
///
/// The first box is the outermost decorator and the last box sits directly
/// on `source`, so `compose(&[a, b], s)` maps through `s`, then `b`, then `a`.
pub fn compose<G>(
    boxes: &[PeriodicBox],
    source: Box<dyn TopologyMapper<G>>,
) -> Box<dyn TopologyMapper<G>>
where
    G: Graph + 'static,
{
    boxes.iter().rev().fold(source, |upstream, periodic| {
        Box::new(periodic.wrap(upstream)) as Box<dyn TopologyMapper<G>>
    })
}
