//! Toposcope Core: graph model, orientation semantics and handle utilities

pub mod analysis;
pub mod color;
pub mod directed;
pub mod error;
pub mod flat_torus;
pub mod graph;
pub mod groups;
pub mod model;
pub mod orientation;
pub mod util;


pub use analysis::{reachable_from, strongly_connected_components, ArcGraph};
pub use color::{ColorTransfer, Rgb};
pub use directed::DirectedGraph;
pub use error::{GraphError, GraphResult};
pub use flat_torus::FlatTorus;
pub use graph::Graph;
pub use groups::{
    DisplayGroup, DisplayMode, DisplayOptions, EdgeDisplayMode, EdgeGroup, GenericGroup, Handle,
    NodeDisplayMode, NodeGroup,
};
pub use model::{EdgeId, ElementData, NodeId, Position};
pub use orientation::{EdgeEnds, EdgeOrientation, Interpretation};
pub use util::{index_map, index_unmap, IdAllocator, IterationGuard, OrderedMap};
