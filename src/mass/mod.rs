//! Converting building solids into direct shapes.
//!
//! A solid is converted by trying [`ShapeConversion`] strategies in order;
//! the first that succeeds wins. The default order is an exact B-rep first
//! and a triangle mesh second.

mod brep;
mod mesh;

pub use brep::BrepConversion;
pub use mesh::MeshConversion;

use tracing::{debug, instrument, warn};

use crate::document::{ShapeCategory, ShapeGeometry, ShapeId, Transaction};
use crate::error::{ConversionAttempt, ConversionError, GeometryError, Result};
use crate::loops::{BoundaryLoop, LoopExtractor};
use crate::topology::{FaceId, SolidId, TopologyStore};

/// One way of turning a solid into direct shape geometry.
pub trait ShapeConversion {
    /// Short name used in logs and in [`ConversionError`] attempt logs.
    fn name(&self) -> &'static str;

    /// Converts `solid` into geometry in model units.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the solid cannot be represented this way.
    fn convert(&self, store: &TopologyStore, solid: SolidId)
        -> std::result::Result<ShapeGeometry, GeometryError>;
}

/// The default strategies: exact B-rep, then mesh.
#[must_use]
pub fn default_strategies() -> Vec<Box<dyn ShapeConversion>> {
    vec![
        Box::new(BrepConversion::default()),
        Box::new(MeshConversion::default()),
    ]
}

/// Tries each strategy in order and returns the first success together with
/// the name of the strategy that produced it.
///
/// # Errors
///
/// Returns a [`ConversionError`] carrying every failed attempt, the first one
/// being its source.
pub fn convert_with_fallback(
    strategies: &[Box<dyn ShapeConversion>],
    store: &TopologyStore,
    solid: SolidId,
) -> std::result::Result<(ShapeGeometry, &'static str), ConversionError> {
    let mut attempts = Vec::new();
    for strategy in strategies {
        match strategy.convert(store, solid) {
            Ok(geometry) => {
                debug!(strategy = strategy.name(), failed = attempts.len(), "solid converted");
                return Ok((geometry, strategy.name()));
            }
            Err(cause) => {
                warn!(strategy = strategy.name(), %cause, "conversion strategy failed");
                attempts.push(ConversionAttempt {
                    strategy: strategy.name(),
                    cause,
                });
            }
        }
    }
    Err(ConversionError { attempts })
}

/// Extracts the loops of a face and converts them to model units.
fn model_face_loops(
    extractor: &impl LoopExtractor,
    store: &TopologyStore,
    face: FaceId,
) -> std::result::Result<Vec<BoundaryLoop>, GeometryError> {
    Ok(extractor
        .extract_loops(store, face)?
        .iter()
        .map(BoundaryLoop::to_model_units)
        .collect())
}

/// Creates a direct shape from a building solid.
pub struct CreateMass {
    solid: SolidId,
    category: ShapeCategory,
    strategies: Vec<Box<dyn ShapeConversion>>,
}

impl CreateMass {
    /// Creates a new `CreateMass` operation with the default strategies.
    #[must_use]
    pub fn new(solid: SolidId, category: ShapeCategory) -> Self {
        Self {
            solid,
            category,
            strategies: default_strategies(),
        }
    }

    /// Replaces the conversion strategies, tried in the given order.
    #[must_use]
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn ShapeConversion>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Converts the solid and creates the direct shape.
    ///
    /// # Errors
    ///
    /// Returns a topology error if the solid is not in the store and a
    /// [`ConversionError`] if no strategy can convert it. Nothing is created
    /// in either case.
    #[instrument(skip_all, fields(category = ?self.category))]
    pub fn execute(&self, tx: &mut Transaction<'_>, store: &TopologyStore) -> Result<ShapeId> {
        store.solid(self.solid)?;
        let (geometry, strategy) = convert_with_fallback(&self.strategies, store, self.solid)?;
        let id = tx.create_direct_shape(self.category, geometry);
        debug!(?id, strategy, "direct shape created");
        Ok(id)
    }
}
