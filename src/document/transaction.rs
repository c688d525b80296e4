use tracing::{debug, trace};

use crate::error::ModelError;
use crate::floors::FloorType;
use crate::loops::BoundaryLoop;

use super::elements::{
    DirectShapeData, ElementKey, ElementTypeData, ElementTypeId, FloorData, FloorId, LevelData,
    LevelId, OpeningData, OpeningId, ShapeCategory, ShapeGeometry, ShapeId,
};
use super::journal::ModelEvent;
use super::Document;

/// An open mutation scope on a [`Document`].
///
/// Holding the document's `&mut` borrow makes the scope single-writer and
/// non-reentrant. The scope commits when dropped, so pending changes become
/// durable on every exit path, including early returns and panics.
pub struct Transaction<'doc> {
    doc: &'doc mut Document,
    name: String,
}

impl<'doc> Transaction<'doc> {
    /// Opens a mutation scope.
    pub fn start(doc: &'doc mut Document, name: impl Into<String>) -> Self {
        let name = name.into();
        trace!(%name, "transaction started");
        doc.record(ModelEvent::TransactionStarted { name: name.clone() }, None);
        Self { doc, name }
    }

    /// Read access to the document while the scope is open.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.doc
    }

    /// Commits everything pending and reopens the scope under the same name.
    ///
    /// Used where a later call must observe earlier creations as durable,
    /// such as cutting openings into a floor created in this scope.
    pub fn force_intermediate_commit(&mut self) {
        debug!(name = %self.name, "intermediate commit");
        self.doc.commit_pending(&self.name);
        self.doc.record(
            ModelEvent::TransactionStarted {
                name: self.name.clone(),
            },
            None,
        );
    }

    /// Commits and closes the scope.
    pub fn commit(self) {
        drop(self);
    }

    // --- Element types ---

    /// Registers a construction template.
    pub fn add_element_type(&mut self, data: ElementTypeData) -> ElementTypeId {
        let name = data.name.clone();
        let id = self.doc.element_types.insert(data);
        self.doc.record(
            ModelEvent::ElementTypeAdded { id, name },
            Some(ElementKey::ElementType(id)),
        );
        id
    }

    // --- Levels ---

    /// Creates a level.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateLevelName`] if the name is taken.
    pub fn create_level(&mut self, name: &str, elevation: f64) -> Result<LevelId, ModelError> {
        if self.doc.level_names.contains_key(name) {
            return Err(ModelError::DuplicateLevelName(name.to_owned()));
        }
        let id = self.doc.levels.insert(LevelData {
            name: name.to_owned(),
            elevation,
        });
        self.doc.level_names.insert(name.to_owned(), id);
        self.doc.record(
            ModelEvent::LevelCreated {
                id,
                name: name.to_owned(),
                elevation,
            },
            Some(ElementKey::Level(id)),
        );
        Ok(id)
    }

    /// Moves a level to a new elevation. Recorded only if it changes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if the level does not exist.
    pub fn set_level_elevation(&mut self, id: LevelId, elevation: f64) -> Result<(), ModelError> {
        let level = self
            .doc
            .levels
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("level"))?;
        let from = level.elevation;
        if (from - elevation).abs() <= f64::EPSILON * from.abs().max(1.0) {
            return Ok(());
        }
        level.elevation = elevation;
        self.doc.record(
            ModelEvent::LevelElevationChanged {
                id,
                from,
                to: elevation,
            },
            None,
        );
        Ok(())
    }

    // --- Floors ---

    /// Creates a floor from an outer loop on a level.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if the level or floor type does
    /// not exist.
    pub fn create_floor(
        &mut self,
        outline: BoundaryLoop,
        floor_type: FloorType,
        level: LevelId,
    ) -> Result<FloorId, ModelError> {
        self.doc.level(level)?;
        self.doc.element_type(floor_type.id())?;
        let id = self.doc.floors.insert(FloorData {
            level,
            floor_type: floor_type.id(),
            outline,
            openings: Vec::new(),
        });
        self.doc
            .record(ModelEvent::FloorCreated { id, level }, Some(ElementKey::Floor(id)));
        Ok(id)
    }

    /// Cuts an opening through a floor.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::FloorNotCommitted`] if the floor's creation is
    /// still pending, or [`ModelError::EntityNotFound`] if it does not exist.
    pub fn create_opening(
        &mut self,
        floor: FloorId,
        boundary: BoundaryLoop,
    ) -> Result<OpeningId, ModelError> {
        self.doc.floor(floor)?;
        if !self.doc.is_committed(ElementKey::Floor(floor)) {
            return Err(ModelError::FloorNotCommitted);
        }
        let id = self.doc.openings.insert(OpeningData { floor, boundary });
        if let Some(data) = self.doc.floors.get_mut(floor) {
            data.openings.push(id);
        }
        self.doc
            .record(ModelEvent::OpeningCreated { id, floor }, Some(ElementKey::Opening(id)));
        Ok(id)
    }

    // --- Direct shapes ---

    /// Creates a free-form element.
    pub fn create_direct_shape(
        &mut self,
        category: ShapeCategory,
        geometry: ShapeGeometry,
    ) -> ShapeId {
        let id = self.doc.shapes.insert(DirectShapeData { category, geometry });
        self.doc
            .record(ModelEvent::ShapeCreated { id, category }, Some(ElementKey::Shape(id)));
        id
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        trace!(name = %self.name, "transaction closed");
        self.doc.commit_pending(&self.name);
    }
}

/// Runs `work` inside a transaction that is committed however `work` exits.
///
/// # Errors
///
/// Returns whatever `work` returns.
pub fn scoped_transaction<T, E>(
    doc: &mut Document,
    name: &str,
    work: impl FnOnce(&mut Transaction<'_>) -> Result<T, E>,
) -> Result<T, E> {
    let mut tx = Transaction::start(doc, name);
    work(&mut tx)
}
