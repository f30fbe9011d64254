//! Toposcope Mappers: topology to geometry, and the scene handed to renderers

pub mod bounds;
pub mod direct;
pub mod flat_torus;
pub mod mapper;
pub mod path;
pub mod periodic;
pub mod scene;

#[cfg(test)]
pub mod tests;

pub use bounds::BoundingBox;
pub use direct::DirectTopologyMapper;
pub use flat_torus::FlatTorusTopologyMapper;
pub use mapper::{edge_endpoints, EdgePath, TopologyMapper};
pub use path::{distance, path_length, path_segments};
pub use periodic::{compose, PeriodicBoundaryTopologyMapper, PeriodicBox};
pub use scene::{EdgeSnapshot, GroupSnapshot, NodeSnapshot, SceneSnapshot};
