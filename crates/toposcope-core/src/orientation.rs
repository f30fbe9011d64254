//! Edge orientation model and its three interpretations
//!
//! Every edge stores a source, a destination and an [`EdgeOrientation`]. How
//! those three values translate into "where can I go from here" depends on the
//! interpretation an analysis picks:
//!
//! - **direct**: source and destination exactly as stored, orientation ignored.
//! - **canonical**: orientation decides the direction. `Reversed` swaps the
//!   endpoints, `Bidirectional` runs both ways, `Undirected` has no direction
//!   at all (empty source and destination sets).
//! - **symmetrical**: as canonical, except `Undirected` behaves like
//!   `Bidirectional`.
//!
//! For every edge the symmetrical sets contain the canonical ones.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::model::NodeId;

/// How an edge is oriented relative to its stored endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrientation {
    /// No orientation hint at all.
    #[default]
    Undirected,
    /// Runs from source to destination.
    Directed,
    /// Runs both ways.
    Bidirectional,
    /// Runs from destination to source.
    Reversed,
}

impl EdgeOrientation {
    pub const ALL: [EdgeOrientation; 4] = [
        EdgeOrientation::Undirected,
        EdgeOrientation::Directed,
        EdgeOrientation::Bidirectional,
        EdgeOrientation::Reversed,
    ];

    /// Bitmask value used by serialized graphs.
    pub fn bits(self) -> u8 {
        match self {
            EdgeOrientation::Undirected => 1 << 0,
            EdgeOrientation::Directed => 1 << 1,
            EdgeOrientation::Bidirectional => 1 << 2,
            EdgeOrientation::Reversed => 1 << 3,
        }
    }

    /// Decode a bitmask value. Anything but a single known flag is rejected.
    pub fn from_bits(bits: u8) -> GraphResult<Self> {
        EdgeOrientation::ALL
            .into_iter()
            .find(|o| o.bits() == bits)
            .ok_or(GraphError::InvalidOrientation(bits))
    }

    /// Whether the stored source links towards the stored destination.
    pub fn links_forward(self) -> bool {
        matches!(
            self,
            EdgeOrientation::Undirected | EdgeOrientation::Directed | EdgeOrientation::Bidirectional
        )
    }

    /// Whether the stored destination links back towards the stored source.
    pub fn links_backward(self) -> bool {
        matches!(
            self,
            EdgeOrientation::Undirected | EdgeOrientation::Reversed | EdgeOrientation::Bidirectional
        )
    }
}

impl TryFrom<u8> for EdgeOrientation {
    type Error = GraphError;

    fn try_from(bits: u8) -> GraphResult<Self> {
        EdgeOrientation::from_bits(bits)
    }
}

/// Which reading of source/destination/orientation an analysis wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    Direct,
    Canonical,
    #[default]
    Symmetrical,
}

/// The stored endpoints of one edge together with its orientation.
///
/// All orientation predicates are pure functions of this triple and the node
/// being asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeEnds {
    pub source: NodeId,
    pub destination: NodeId,
    pub orientation: EdgeOrientation,
}

impl EdgeEnds {
    pub fn new(source: NodeId, destination: NodeId, orientation: EdgeOrientation) -> Self {
        EdgeEnds {
            source,
            destination,
            orientation,
        }
    }

    fn both(first: NodeId, second: NodeId) -> Vec<NodeId> {
        if first == second {
            vec![first]
        } else {
            vec![first, second]
        }
    }

    pub fn canonical_sources(&self) -> Vec<NodeId> {
        match self.orientation {
            EdgeOrientation::Directed => vec![self.source],
            EdgeOrientation::Reversed => vec![self.destination],
            EdgeOrientation::Undirected => Vec::new(),
            EdgeOrientation::Bidirectional => Self::both(self.source, self.destination),
        }
    }

    pub fn canonical_destinations(&self) -> Vec<NodeId> {
        match self.orientation {
            EdgeOrientation::Directed => vec![self.destination],
            EdgeOrientation::Reversed => vec![self.source],
            EdgeOrientation::Undirected => Vec::new(),
            EdgeOrientation::Bidirectional => Self::both(self.destination, self.source),
        }
    }

    pub fn symmetrical_sources(&self) -> Vec<NodeId> {
        match self.orientation {
            EdgeOrientation::Undirected => Self::both(self.source, self.destination),
            _ => self.canonical_sources(),
        }
    }

    pub fn symmetrical_destinations(&self) -> Vec<NodeId> {
        match self.orientation {
            EdgeOrientation::Undirected => Self::both(self.destination, self.source),
            _ => self.canonical_destinations(),
        }
    }

    /// Source set under `interpretation`.
    pub fn sources(&self, interpretation: Interpretation) -> Vec<NodeId> {
        match interpretation {
            Interpretation::Direct => vec![self.source],
            Interpretation::Canonical => self.canonical_sources(),
            Interpretation::Symmetrical => self.symmetrical_sources(),
        }
    }

    /// Destination set under `interpretation`, index-aligned with [`EdgeEnds::sources`].
    pub fn destinations(&self, interpretation: Interpretation) -> Vec<NodeId> {
        match interpretation {
            Interpretation::Direct => vec![self.destination],
            Interpretation::Canonical => self.canonical_destinations(),
            Interpretation::Symmetrical => self.symmetrical_destinations(),
        }
    }

    /// The endpoint across the edge from `node`, if `node` is an endpoint.
    pub fn neighbor(&self, node: NodeId) -> Option<NodeId> {
        if node == self.source {
            Some(self.destination)
        } else if node == self.destination {
            Some(self.source)
        } else {
            None
        }
    }

    pub fn is_incident(&self, node: NodeId) -> bool {
        node == self.source || node == self.destination
    }

    /// Orientation-independent: both endpoints are `node`.
    pub fn is_self_edge(&self, node: NodeId) -> bool {
        node == self.source && node == self.destination
    }

    fn incident_with(&self, node: NodeId, orientation: EdgeOrientation) -> bool {
        self.is_incident(node) && self.orientation == orientation
    }

    pub fn is_directed(&self, node: NodeId) -> bool {
        self.incident_with(node, EdgeOrientation::Directed)
    }

    pub fn is_undirected(&self, node: NodeId) -> bool {
        self.incident_with(node, EdgeOrientation::Undirected)
    }

    pub fn is_reversed(&self, node: NodeId) -> bool {
        self.incident_with(node, EdgeOrientation::Reversed)
    }

    pub fn is_bidirectional(&self, node: NodeId) -> bool {
        self.incident_with(node, EdgeOrientation::Bidirectional)
    }

    pub fn is_canonically_directed(&self, node: NodeId) -> bool {
        self.is_incident(node) && self.orientation != EdgeOrientation::Undirected
    }

    pub fn is_canonically_undirected(&self, node: NodeId) -> bool {
        self.is_undirected(node)
    }

    pub fn is_symmetric(&self, node: NodeId) -> bool {
        self.is_incident(node)
            && matches!(
                self.orientation,
                EdgeOrientation::Bidirectional | EdgeOrientation::Undirected
            )
    }

    pub fn is_asymmetric(&self, node: NodeId) -> bool {
        self.is_incident(node)
            && matches!(self.orientation, EdgeOrientation::Directed | EdgeOrientation::Reversed)
    }

    /// Direct interpretation: `node` is the stored destination.
    pub fn is_in(&self, node: NodeId) -> bool {
        node == self.destination
    }

    /// Direct interpretation: `node` is the stored source.
    pub fn is_out(&self, node: NodeId) -> bool {
        node == self.source
    }

    pub fn is_canonically_in(&self, node: NodeId) -> bool {
        self.is_incident(node)
            && match self.orientation {
                EdgeOrientation::Bidirectional => true,
                EdgeOrientation::Directed => node == self.destination,
                EdgeOrientation::Reversed => node == self.source,
                EdgeOrientation::Undirected => false,
            }
    }

    pub fn is_canonically_out(&self, node: NodeId) -> bool {
        self.is_incident(node)
            && match self.orientation {
                EdgeOrientation::Bidirectional => true,
                EdgeOrientation::Directed => node == self.source,
                EdgeOrientation::Reversed => node == self.destination,
                EdgeOrientation::Undirected => false,
            }
    }

    pub fn is_symmetrically_in(&self, node: NodeId) -> bool {
        self.is_canonically_in(node) || self.is_undirected(node)
    }

    pub fn is_symmetrically_out(&self, node: NodeId) -> bool {
        self.is_canonically_out(node) || self.is_undirected(node)
    }
}
