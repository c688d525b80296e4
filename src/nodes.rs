//! Entry points for hosts whose inputs may be missing.
//!
//! Every input is checked here, before the document is touched, and handed
//! to the core as a strongly typed value.

use tracing::debug;

use crate::config::FloorOptions;
use crate::document::{scoped_transaction, Document, ElementTypeId, ShapeCategory, ShapeId};
use crate::error::{ArgumentError, Result};
use crate::floors::{BuildingFloor, CreateFloors, FloorBatch, FloorType};
use crate::mass::CreateMass;
use crate::topology::{SolidId, TopologyStore};

/// Creates levels, floors and openings from per-story surface collections.
///
/// `level_prefix` and `floor_type` fall back to `options` when absent.
///
/// # Errors
///
/// Returns an [`ArgumentError`] (with the document untouched) if `floors`
/// is absent, holds a null entry, or no usable floor type can be resolved.
/// Otherwise see [`CreateFloors::execute`].
pub fn create_floors(
    doc: &mut Document,
    store: &TopologyStore,
    floors: Option<Vec<Option<BuildingFloor>>>,
    floor_type: Option<ElementTypeId>,
    level_prefix: Option<&str>,
    options: &FloorOptions,
) -> Result<FloorBatch> {
    let floors = floors
        .ok_or(ArgumentError::MissingInput("floors"))?
        .into_iter()
        .enumerate()
        .map(|(index, floor)| floor.ok_or(ArgumentError::NullFloor { index }))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let floor_type = FloorType::resolve(doc, floor_type, options)?;

    let mut options = options.clone();
    if let Some(prefix) = level_prefix {
        options.level_prefix = prefix.to_owned();
    }
    debug!(floors = floors.len(), prefix = %options.level_prefix, "inputs validated");

    CreateFloors::new(floors, floor_type, options).execute(doc, store)
}

/// Creates a direct shape from a building solid.
///
/// # Errors
///
/// Returns an [`ArgumentError`] if an input is absent, and otherwise see
/// [`CreateMass::execute`].
pub fn create_mass(
    doc: &mut Document,
    store: &TopologyStore,
    solid: Option<SolidId>,
    category: Option<ShapeCategory>,
) -> Result<ShapeId> {
    let solid = solid.ok_or(ArgumentError::MissingInput("solid"))?;
    let category = category.ok_or(ArgumentError::MissingInput("category"))?;
    scoped_transaction(doc, "Create Mass", |tx| {
        CreateMass::new(solid, category).execute(tx, store)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::StoreysError;

    #[test]
    fn absent_floors_touch_nothing() {
        let mut doc = Document::new();
        let store = TopologyStore::new();
        let options = FloorOptions::default();
        let result = create_floors(&mut doc, &store, None, None, Some("L"), &options);
        assert!(matches!(
            result,
            Err(StoreysError::Argument(ArgumentError::MissingInput("floors")))
        ));
        assert!(doc.journal().is_empty());
    }

    #[test]
    fn null_floor_is_reported_by_index() {
        let mut doc = Document::new();
        let store = TopologyStore::new();
        let floors = Some(vec![Some(BuildingFloor::default()), None]);
        let result = create_floors(&mut doc, &store, floors, None, None, &FloorOptions::default());
        assert!(matches!(
            result,
            Err(StoreysError::Argument(ArgumentError::NullFloor { index: 1 }))
        ));
    }

    #[test]
    fn absent_mass_inputs_are_rejected() {
        let mut doc = Document::new();
        let store = TopologyStore::new();
        assert!(matches!(
            create_mass(&mut doc, &store, None, Some(ShapeCategory::Mass)),
            Err(StoreysError::Argument(ArgumentError::MissingInput("solid")))
        ));
        assert!(matches!(
            create_mass(&mut doc, &store, Some(SolidId::default()), None),
            Err(StoreysError::Argument(ArgumentError::MissingInput("category")))
        ));
        assert!(doc.journal().is_empty());
    }
}
