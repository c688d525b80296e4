use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a wire in the topology store.
    pub struct WireId;
}

/// An edge with its traversal direction inside a wire.
#[derive(Debug, Clone, Copy)]
pub struct OrientedEdge {
    pub edge: EdgeId,
    /// `false` when the wire runs the edge from its end vertex to its start.
    pub forward: bool,
}

impl OrientedEdge {
    /// Creates a new oriented edge.
    #[must_use]
    pub fn new(edge: EdgeId, forward: bool) -> Self {
        Self { edge, forward }
    }
}

/// An ordered chain of oriented edges. Face boundaries must be closed.
#[derive(Debug, Clone)]
pub struct WireData {
    pub edges: Vec<OrientedEdge>,
    pub is_closed: bool,
}

impl WireData {
    /// Creates a closed wire from edges already in traversal order.
    #[must_use]
    pub fn closed(edges: Vec<OrientedEdge>) -> Self {
        Self {
            edges,
            is_closed: true,
        }
    }
}
