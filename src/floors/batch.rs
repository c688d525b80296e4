use tracing::{info, instrument, warn};

use crate::config::{FloorOptions, GeometryFailurePolicy};
use crate::document::{Document, Transaction};
use crate::error::{ArgumentError, GeometryError, Result, StoreysError};
use crate::loops::{LoopExtractor, WireLoopExtractor};
use crate::topology::TopologyStore;

use super::{floor_elevation, BuildingFloor, FloorBuilder, FloorElement, FloorType, LevelDirectory};

/// Name of the transaction spanning a floor batch.
const TRANSACTION_NAME: &str = "Create Floors";

/// A surface (or one of its openings) that produced no model element.
#[derive(Debug)]
pub struct SurfaceFailure {
    pub floor_index: usize,
    pub surface_index: usize,
    pub error: GeometryError,
}

/// Result of a floor batch.
#[derive(Debug, Default)]
pub struct FloorBatch {
    /// One bucket per building floor, holding its floors in surface order.
    pub floors: Vec<Vec<FloorElement>>,
    /// Surfaces skipped and openings not cut, in the order they were met.
    pub failures: Vec<SurfaceFailure>,
}

impl FloorBatch {
    /// Total number of floors created.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.floors.iter().map(Vec::len).sum()
    }
}

/// Creates one level per building floor and one floor per surface.
///
/// Level `i` is named `"{prefix} {i + 1}"` and placed at the highest point of
/// that building floor's surfaces. Existing levels with the same name are
/// reused and moved, so running the same batch twice creates no new levels.
pub struct CreateFloors<X: LoopExtractor = WireLoopExtractor> {
    floors: Vec<BuildingFloor>,
    floor_type: FloorType,
    options: FloorOptions,
    extractor: X,
}

impl CreateFloors {
    /// Creates a new floor batch using the face-wire loop extractor.
    #[must_use]
    pub fn new(floors: Vec<BuildingFloor>, floor_type: FloorType, options: FloorOptions) -> Self {
        Self {
            floors,
            floor_type,
            options,
            extractor: WireLoopExtractor::new(),
        }
    }
}

impl<X: LoopExtractor> CreateFloors<X> {
    /// Replaces the loop extractor.
    #[must_use]
    pub fn with_extractor<Y: LoopExtractor>(self, extractor: Y) -> CreateFloors<Y> {
        CreateFloors {
            floors: self.floors,
            floor_type: self.floor_type,
            options: self.options,
            extractor,
        }
    }

    /// Executes the batch inside a single `"Create Floors"` transaction.
    ///
    /// Inputs are validated before the document is touched. After that,
    /// what happens to a surface whose geometry cannot be used is decided by
    /// [`FloorOptions::on_geometry_error`]; everything created up to a
    /// failure stays committed.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyFloor`] for a building floor with no
    /// surfaces, an error if an elevation cannot be computed, any model
    /// error, or [`StoreysError::Surface`] under
    /// [`GeometryFailurePolicy::AbortBatch`].
    #[instrument(skip_all, fields(floors = self.floors.len()))]
    pub fn execute(&self, doc: &mut Document, store: &TopologyStore) -> Result<FloorBatch> {
        let elevations = self
            .floors
            .iter()
            .enumerate()
            .map(|(index, floor)| {
                if floor.surfaces.is_empty() {
                    return Err(ArgumentError::EmptyFloor { index }.into());
                }
                floor_elevation(store, floor)
            })
            .collect::<Result<Vec<f64>>>()?;

        let directory = LevelDirectory::new(self.options.level_prefix.clone());
        let builder = FloorBuilder::new(&self.extractor);
        let policy = self.options.on_geometry_error;
        let mut batch = FloorBatch {
            floors: Vec::with_capacity(self.floors.len()),
            failures: Vec::new(),
        };

        let mut tx = Transaction::start(doc, TRANSACTION_NAME);
        for (floor_index, (floor, elevation)) in self.floors.iter().zip(elevations).enumerate() {
            let name = directory.level_name(floor_index);
            let level = directory.find_or_create(&mut tx, &name, elevation)?;

            let mut bucket = Vec::with_capacity(floor.surfaces.len());
            for (surface_index, &surface) in floor.surfaces.iter().enumerate() {
                match builder.build(&mut tx, store, surface, level, self.floor_type) {
                    Ok(built) => {
                        batch
                            .failures
                            .extend(built.opening_errors.into_iter().map(|error| SurfaceFailure {
                                floor_index,
                                surface_index,
                                error,
                            }));
                        bucket.push(built.element);
                    }
                    Err(StoreysError::Geometry(error)) => {
                        warn!(floor_index, surface_index, %error, ?policy, "surface skipped");
                        if policy == GeometryFailurePolicy::AbortBatch {
                            return Err(StoreysError::Surface {
                                floor: floor_index,
                                surface: surface_index,
                                source: error,
                            });
                        }
                        batch.failures.push(SurfaceFailure {
                            floor_index,
                            surface_index,
                            error,
                        });
                        if policy == GeometryFailurePolicy::AbortFloor {
                            break;
                        }
                    }
                    Err(other) => return Err(other),
                }
            }
            info!(level = %name, elevation, floors = bucket.len(), "building floor done");
            batch.floors.push(bucket);
        }
        tx.commit();

        info!(
            floors = batch.floor_count(),
            failures = batch.failures.len(),
            "floor batch complete"
        );
        Ok(batch)
    }
}
