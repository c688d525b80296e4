use tracing::{debug, instrument};

use crate::document::{LevelId, Transaction};
use crate::error::{ModelError, Result};
use crate::math::units::mm_to_model;
use crate::operations::query::BoundingBox;
use crate::topology::TopologyStore;

use super::BuildingFloor;

/// Finds or creates the named levels that generated floors are hosted on.
#[derive(Debug, Clone)]
pub struct LevelDirectory {
    prefix: String,
}

impl LevelDirectory {
    /// Creates a directory that names levels `"{prefix} {n}"`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Name of the level for the building floor at 0-based `index`.
    #[must_use]
    pub fn level_name(&self, index: usize) -> String {
        format!("{} {}", self.prefix, index + 1)
    }

    /// Returns the level called `name`, moved to `elevation`, creating it if
    /// the document has none.
    ///
    /// A reused level is mutated in place, so every floor already hosted on
    /// it sees the new elevation.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the document rejects the change.
    #[instrument(skip(self, tx))]
    pub fn find_or_create(
        &self,
        tx: &mut Transaction<'_>,
        name: &str,
        elevation: f64,
    ) -> std::result::Result<LevelId, ModelError> {
        if let Some(id) = tx.document().level_by_name(name) {
            debug!(?id, "reusing level");
            tx.set_level_elevation(id, elevation)?;
            return Ok(id);
        }
        let id = tx.create_level(name, elevation)?;
        debug!(?id, "created level");
        Ok(id)
    }
}

/// Elevation for a building floor: the highest point of its surfaces,
/// converted to model units.
///
/// # Errors
///
/// Returns an error if a surface is missing from the store or the floor has
/// no surfaces.
pub fn floor_elevation(store: &TopologyStore, floor: &BuildingFloor) -> Result<f64> {
    let bounds = BoundingBox::faces(floor.surfaces.clone()).execute(store)?;
    Ok(mm_to_model(bounds.max.z))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::document::{scoped_transaction, Document, ModelEvent};
    use crate::math::Point3;
    use crate::operations::creation::{MakeFace, MakeWire};
    use approx::assert_relative_eq;

    #[test]
    fn names_are_one_based() {
        let dir = LevelDirectory::new("L");
        assert_eq!(dir.level_name(0), "L 1");
        assert_eq!(dir.level_name(1), "L 2");
        assert_eq!(LevelDirectory::new("Dynamo Level").level_name(9), "Dynamo Level 10");
    }

    #[test]
    fn second_lookup_reuses_and_moves_level() {
        let mut doc = Document::new();
        let dir = LevelDirectory::new("L");
        let first =
            scoped_transaction(&mut doc, "a", |tx| dir.find_or_create(tx, "L 1", 10.0)).unwrap();
        let second =
            scoped_transaction(&mut doc, "b", |tx| dir.find_or_create(tx, "L 1", 12.5)).unwrap();

        assert_eq!(first, second);
        assert_eq!(doc.level_count(), 1);
        assert_relative_eq!(doc.level(first).unwrap().elevation, 12.5);
        assert!(doc.journal().iter().any(|e| matches!(
            e,
            ModelEvent::LevelElevationChanged { from, to, .. }
                if (*from - 10.0).abs() < 1e-12 && (*to - 12.5).abs() < 1e-12
        )));
    }

    #[test]
    fn elevation_is_highest_surface_in_feet() {
        let mut store = TopologyStore::new();
        let mut surfaces = Vec::new();
        for z in [2_743.2, 3_048.0] {
            let wire = MakeWire::new(
                vec![
                    Point3::new(0.0, 0.0, z),
                    Point3::new(1_000.0, 0.0, z),
                    Point3::new(1_000.0, 1_000.0, z),
                ],
                true,
            )
            .execute(&mut store)
            .unwrap();
            surfaces.push(MakeFace::new(wire, vec![]).execute(&mut store).unwrap());
        }
        let elevation = floor_elevation(&store, &BuildingFloor::new(surfaces)).unwrap();
        assert_relative_eq!(elevation, 10.0, epsilon = 1e-9);
    }
}
