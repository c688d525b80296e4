//! The target model: an in-memory document of levels, floors, openings and
//! direct shapes.
//!
//! `Document` only answers queries. Every change goes through a
//! [`Transaction`], which holds the document's unique mutable borrow for as
//! long as it is open and commits on every exit path.

mod elements;
mod journal;
mod transaction;

pub use elements::{
    BrepShape, DirectShapeData, ElementKey, ElementTypeData, ElementTypeId, FloorData, FloorId,
    LevelData, LevelId, OpeningData, OpeningId, ShapeCategory, ShapeGeometry, ShapeId, TypeFamily,
};
pub use journal::ModelEvent;
pub use transaction::{scoped_transaction, Transaction};

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::error::ModelError;

/// In-memory target model.
#[derive(Debug, Default)]
pub struct Document {
    levels: SlotMap<LevelId, LevelData>,
    level_names: HashMap<String, LevelId>,
    element_types: SlotMap<ElementTypeId, ElementTypeData>,
    floors: SlotMap<FloorId, FloorData>,
    openings: SlotMap<OpeningId, OpeningData>,
    shapes: SlotMap<ShapeId, DirectShapeData>,
    /// Elements created since the last commit.
    pending: Vec<ElementKey>,
    /// Mutations recorded since the last commit.
    uncommitted: usize,
    journal: Vec<ModelEvent>,
    commits: usize,
}

impl Document {
    /// Creates a new, empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Levels ---

    /// Returns the level data.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if the level does not exist.
    pub fn level(&self, id: LevelId) -> Result<&LevelData, ModelError> {
        self.levels
            .get(id)
            .ok_or(ModelError::EntityNotFound("level"))
    }

    /// Looks a level up by its unique name.
    #[must_use]
    pub fn level_by_name(&self, name: &str) -> Option<LevelId> {
        self.level_names.get(name).copied()
    }

    /// Number of levels in the document.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    // --- Element types ---

    /// Returns the element type data.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if the type does not exist.
    pub fn element_type(&self, id: ElementTypeId) -> Result<&ElementTypeData, ModelError> {
        self.element_types
            .get(id)
            .ok_or(ModelError::EntityNotFound("element type"))
    }

    /// Finds the first element type with the given name.
    #[must_use]
    pub fn element_type_by_name(&self, name: &str) -> Option<ElementTypeId> {
        self.element_types
            .iter()
            .find(|(_, data)| data.name == name)
            .map(|(id, _)| id)
    }

    // --- Floors and openings ---

    /// Returns the floor data.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if the floor does not exist.
    pub fn floor(&self, id: FloorId) -> Result<&FloorData, ModelError> {
        self.floors
            .get(id)
            .ok_or(ModelError::EntityNotFound("floor"))
    }

    /// Number of floors in the document.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Floors hosted on a level, in creation order.
    #[must_use]
    pub fn floors_on(&self, level: LevelId) -> Vec<FloorId> {
        self.floors
            .iter()
            .filter(|(_, data)| data.level == level)
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the opening data.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if the opening does not exist.
    pub fn opening(&self, id: OpeningId) -> Result<&OpeningData, ModelError> {
        self.openings
            .get(id)
            .ok_or(ModelError::EntityNotFound("opening"))
    }

    // --- Direct shapes ---

    /// Returns the direct shape data.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if the shape does not exist.
    pub fn shape(&self, id: ShapeId) -> Result<&DirectShapeData, ModelError> {
        self.shapes
            .get(id)
            .ok_or(ModelError::EntityNotFound("direct shape"))
    }

    // --- Transactions ---

    /// Whether the element's creation has been committed.
    #[must_use]
    pub fn is_committed(&self, key: ElementKey) -> bool {
        !self.pending.contains(&key)
    }

    /// Number of commits performed so far.
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Every change recorded so far, oldest first.
    #[must_use]
    pub fn journal(&self) -> &[ModelEvent] {
        &self.journal
    }

    fn record(&mut self, event: ModelEvent, created: Option<ElementKey>) {
        if event.is_mutation() {
            self.uncommitted += 1;
        }
        if let Some(key) = created {
            self.pending.push(key);
        }
        self.journal.push(event);
    }

    fn commit_pending(&mut self, name: &str) {
        let changes = std::mem::take(&mut self.uncommitted);
        self.pending.clear();
        self.commits += 1;
        self.journal.push(ModelEvent::Committed {
            name: name.to_owned(),
            changes,
        });
    }
}
