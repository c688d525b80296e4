use tracing::{debug, instrument, warn};

use crate::document::{LevelId, Transaction};
use crate::error::{GeometryError, Result};
use crate::geometry::surface::Plane;
use crate::loops::{BoundaryLoop, LoopExtractor};
use crate::math::polygon_3d::{newell_normal, point_in_polygon_3d, polygons_cross_3d};
use crate::math::units::mm_to_model;
use crate::math::{Point3, Vector3, LOOP_TOLERANCE};
use crate::topology::{FaceId, TopologyStore};

use super::{FloorElement, FloorType};

/// A floor built from one surface, with the openings that could not be cut.
#[derive(Debug)]
pub struct BuiltFloor {
    pub element: FloorElement,
    pub opening_errors: Vec<GeometryError>,
}

/// Builds one floor element (plus openings) per surface.
pub struct FloorBuilder<'a, X: LoopExtractor> {
    extractor: &'a X,
}

impl<'a, X: LoopExtractor> FloorBuilder<'a, X> {
    /// Creates a builder that decomposes surfaces with `extractor`.
    #[must_use]
    pub fn new(extractor: &'a X) -> Self {
        Self { extractor }
    }

    /// Builds the floor for `surface` on `level`.
    ///
    /// The floor is committed before any opening is cut, since openings can
    /// only be cut through a floor that already exists in the model. An
    /// opening loop that does not lie inside the outline (a vertex outside
    /// it, or an edge crossing it) is skipped and reported in
    /// [`BuiltFloor::opening_errors`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreysError::Geometry`] if the surface cannot be
    /// decomposed (nothing is created), or a model error if the document
    /// rejects a creation.
    #[instrument(skip(self, tx, store))]
    pub fn build(
        &self,
        tx: &mut Transaction<'_>,
        store: &TopologyStore,
        surface: FaceId,
        level: LevelId,
        floor_type: FloorType,
    ) -> Result<BuiltFloor> {
        let mut loops = self.extractor.extract_loops(store, surface)?.into_iter();
        let outline = loops
            .next()
            .ok_or_else(|| GeometryError::Degenerate("surface has no boundary loops".into()))?
            .to_model_units();
        let openings: Vec<BoundaryLoop> = loops.map(|l| l.to_model_units()).collect();

        let outline_polygon = outline.polygon()?;
        let outline_plane = horizontal_plane(&outline_polygon)?;

        let floor = tx.create_floor(outline, floor_type, level)?;
        tx.force_intermediate_commit();
        debug!(?floor, openings = openings.len(), "floor committed");

        let mut element = FloorElement {
            floor,
            level,
            openings: Vec::with_capacity(openings.len()),
        };
        let mut opening_errors = Vec::new();
        for (i, opening) in openings.into_iter().enumerate() {
            let loop_index = i + 1;
            let polygon = opening.polygon()?;
            let inside = polygon
                .iter()
                .all(|p| point_in_polygon_3d(p, &outline_polygon, &outline_plane))
                && !polygons_cross_3d(&polygon, &outline_polygon, &outline_plane);
            if !inside {
                warn!(loop_index, "opening outside floor outline, skipped");
                opening_errors.push(GeometryError::OpeningOutsideFloor { loop_index });
                continue;
            }
            element.openings.push(tx.create_opening(floor, opening)?);
        }

        Ok(BuiltFloor {
            element,
            opening_errors,
        })
    }
}

/// Checks that an outline (in model units) lies in a horizontal plane and
/// returns that plane.
///
/// The outline may rise by at most the loop tolerance across its extent, the
/// same length scale the loop planarity check uses.
fn horizontal_plane(polygon: &[Point3]) -> std::result::Result<Plane, GeometryError> {
    let normal = newell_normal(polygon)?;
    let origin = polygon[0];
    let (lo, hi) = polygon
        .iter()
        .fold((origin, origin), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
    let max_tilt = mm_to_model(LOOP_TOLERANCE) / (hi - lo).norm();
    let tilt = normal.cross(&Vector3::z()).norm();
    if tilt > max_tilt {
        return Err(GeometryError::NotHorizontal { tilt });
    }
    Plane::from_normal(origin, normal)
}
