use super::elements::{ElementTypeId, FloorId, LevelId, OpeningId, ShapeCategory, ShapeId};

/// One recorded change to the document, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    TransactionStarted {
        name: String,
    },
    /// Pending changes became durable.
    Committed {
        name: String,
        changes: usize,
    },
    ElementTypeAdded {
        id: ElementTypeId,
        name: String,
    },
    LevelCreated {
        id: LevelId,
        name: String,
        elevation: f64,
    },
    LevelElevationChanged {
        id: LevelId,
        from: f64,
        to: f64,
    },
    FloorCreated {
        id: FloorId,
        level: LevelId,
    },
    OpeningCreated {
        id: OpeningId,
        floor: FloorId,
    },
    ShapeCreated {
        id: ShapeId,
        category: ShapeCategory,
    },
}

impl ModelEvent {
    /// Whether the event changed model content (as opposed to transaction
    /// bookkeeping).
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::TransactionStarted { .. } | Self::Committed { .. })
    }
}
