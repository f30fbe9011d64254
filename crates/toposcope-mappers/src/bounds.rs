//! Axis-aligned box shared by the box-embedding mappers

use serde::Serialize;
use toposcope_core::{GraphError, GraphResult, Position};

/// Validate a component index into a 3D vector.
pub(crate) fn axis(index: usize) -> GraphResult<usize> {
    if index < 3 {
        Ok(index)
    } else {
        Err(GraphError::IndexOutOfBounds { index, len: 3 })
    }
}

/// A box given by its center and edge lengths. Edge lengths are kept non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    center: Position,
    dimensions: Position,
}

impl BoundingBox {
    pub fn new(center: Position, dimensions: Position) -> Self {
        BoundingBox {
            center,
            dimensions: dimensions.map(f64::abs),
        }
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn dimensions(&self) -> Position {
        self.dimensions
    }

    pub fn set_center(&mut self, center: Position) {
        self.center = center;
    }

    pub fn set_dimensions(&mut self, dimensions: Position) {
        self.dimensions = dimensions.map(f64::abs);
    }

    pub fn center_component(&self, i: usize) -> GraphResult<f64> {
        Ok(self.center[axis(i)?])
    }

    pub fn dimension_component(&self, i: usize) -> GraphResult<f64> {
        Ok(self.dimensions[axis(i)?])
    }

    pub fn set_center_component(&mut self, i: usize, x: f64) -> GraphResult<()> {
        self.center[axis(i)?] = x;
        Ok(())
    }

    pub fn set_dimension_component(&mut self, i: usize, x: f64) -> GraphResult<()> {
        self.dimensions[axis(i)?] = x.abs();
        Ok(())
    }

    /// Minimum corner: `center - dimensions / 2`.
    pub fn lower_corner(&self) -> Position {
        std::array::from_fn(|i| self.center[i] - 0.5 * self.dimensions[i])
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox::new([0.0; 3], [1.0; 3])
    }
}
