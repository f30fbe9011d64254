//! Regular embedding of a flat torus into a box

use toposcope_core::{EdgeId, FlatTorus, Graph, GraphResult, NodeId, Position};

use crate::bounds::{axis, BoundingBox};
use crate::mapper::{edge_endpoints, EdgePath, TopologyMapper};

/// Lays the first three torus axes out on a regular grid inside a box.
///
/// Axis `i` of the box is cut into `dims[i]` cells and every node sits in the
/// middle of its cell. Integer shifts roll the grid along each axis, wrapping
/// around. Box axes without a matching torus axis hold every node at the box
/// center; torus axes beyond the third are ignored.
///
/// An edge that wraps (its source lies past its destination along the
/// edge's axis, or it is the self-edge of a size-1 axis) is drawn as two
/// half-cell stubs leaving and entering the box, separated by a break.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatTorusTopologyMapper {
    bounds: BoundingBox,
    shifts: [i64; 3],
}

impl FlatTorusTopologyMapper {
    pub fn new(center: Position, dimensions: Position) -> Self {
        FlatTorusTopologyMapper {
            bounds: BoundingBox::new(center, dimensions),
            shifts: [0; 3],
        }
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

    pub fn shifts(&self) -> [i64; 3] {
        self.shifts
    }

    pub fn shift_component(&self, i: usize) -> GraphResult<i64> {
        Ok(self.shifts[axis(i)?])
    }

    /// Shifts are whole cells; fractional parts are floored away.
    pub fn set_shifts(&mut self, shifts: [f64; 3]) {
        self.shifts = shifts.map(|x| x.floor() as i64);
    }

    pub fn set_shift_component(&mut self, i: usize, x: f64) -> GraphResult<()> {
        self.shifts[axis(i)?] = x.floor() as i64;
        Ok(())
    }

    pub fn with_shifts(mut self, shifts: [f64; 3]) -> Self {
        self.set_shifts(shifts);
        self
    }

    /// Size of one cell along box axis `i` for a torus axis of `size` nodes.
    fn cell(&self, i: usize, size: usize) -> f64 {
        self.bounds.dimensions()[i] / size as f64
    }
}

impl TopologyMapper<FlatTorus> for FlatTorusTopologyMapper {
    fn node_to_position(&self, graph: &FlatTorus, node: NodeId) -> GraphResult<Position> {
        let coords = graph.node_coordinates(node)?;
        let sizes = graph.dimensions();
        let center = self.bounds.center();
        let dims = self.bounds.dimensions();

        Ok(std::array::from_fn(|i| match (coords.get(i), sizes.get(i)) {
            (Some(&c), Some(&size)) => {
                // Widened so that any saturated shift still wraps.
                let wrapped = (c as i128 + self.shifts[i] as i128).rem_euclid(size as i128) as f64;
                let delta = self.cell(i, size);
                wrapped * delta + center[i] - 0.5 * dims[i] + 0.5 * delta
            }
            _ => center[i],
        }))
    }

    fn edge_to_path(&self, graph: &FlatTorus, edge: EdgeId) -> GraphResult<EdgePath> {
        let (_, dim) = graph.edge_coordinates(edge)?;
        let (p0, p1) = edge_endpoints(self, graph, edge)?;
        if dim >= 3 {
            return Ok(vec![Some(p0), Some(p1)]);
        }

        let self_wrap = graph.edge_source(edge)? == graph.edge_destination(edge)?;
        if !(p0[dim] > p1[dim] || self_wrap) {
            return Ok(vec![Some(p0), Some(p1)]);
        }

        let half = 0.5 * self.cell(dim, graph.dimensions()[dim]);
        let mut leaving = p0;
        leaving[dim] += half;
        let mut entering = p1;
        entering[dim] -= half;
        Ok(vec![Some(p0), Some(leaving), None, Some(entering), Some(p1)])
    }
}
