use crate::error::GeometryError;
use crate::geometry::surface::Surface;
use crate::math::polygon_3d::{max_plane_deviation, signed_area_about};
use crate::math::{Point3, LOOP_TOLERANCE};
use crate::topology::{FaceId, TopologyStore, WireId};

use super::{BoundaryLoop, LoopCurve, LoopRole};

/// Decomposes a surface into its boundary loops.
///
/// Implementations return at least one loop; the first is the outer
/// boundary and the rest are openings.
pub trait LoopExtractor {
    /// Extracts the loops of `surface`.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the boundary cannot be decomposed into
    /// closed planar loops.
    fn extract_loops(
        &self,
        store: &TopologyStore,
        surface: FaceId,
    ) -> Result<Vec<BoundaryLoop>, GeometryError>;
}

/// Reads loops straight from a face's outer and inner wires.
#[derive(Debug, Clone, Copy)]
pub struct WireLoopExtractor {
    tolerance: f64,
}

impl Default for WireLoopExtractor {
    fn default() -> Self {
        Self {
            tolerance: LOOP_TOLERANCE,
        }
    }
}

impl WireLoopExtractor {
    /// Creates an extractor with the default closure/planarity tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the closure/planarity tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn wire_curves(
        &self,
        store: &TopologyStore,
        wire: WireId,
    ) -> Result<Vec<LoopCurve>, GeometryError> {
        let edges = &store.wire(wire)?.edges;
        let mut curves = Vec::with_capacity(edges.len());
        for oe in edges {
            let edge = store.edge(oe.edge)?;
            let curve = LoopCurve {
                curve: edge.curve.clone(),
                t_start: edge.t_start,
                t_end: edge.t_end,
                start: store.vertex(edge.start)?.point,
                end: store.vertex(edge.end)?.point,
            };
            curves.push(if oe.forward { curve } else { curve.reversed() });
        }
        Ok(curves)
    }

    fn check_closed(&self, loop_index: usize, curves: &[LoopCurve]) -> Result<(), GeometryError> {
        let n = curves.len();
        for i in 0..n {
            let gap = (curves[(i + 1) % n].start - curves[i].end).norm();
            if gap > self.tolerance {
                return Err(GeometryError::OpenLoop {
                    loop_index,
                    curve_index: i,
                    gap,
                });
            }
        }
        Ok(())
    }

    fn distinct_vertex_count(&self, points: &[Point3]) -> usize {
        let mut distinct: Vec<&Point3> = Vec::with_capacity(points.len());
        for p in points {
            if distinct.iter().all(|q| (*q - p).norm() > self.tolerance) {
                distinct.push(p);
            }
        }
        distinct.len()
    }
}

impl LoopExtractor for WireLoopExtractor {
    fn extract_loops(
        &self,
        store: &TopologyStore,
        surface: FaceId,
    ) -> Result<Vec<BoundaryLoop>, GeometryError> {
        let plane = store.face(surface)?.oriented_plane();
        let normal = plane.normal(0.0, 0.0)?;
        let wires = store.face_wires(surface)?;

        let mut loops = Vec::with_capacity(wires.len());
        for (loop_index, wire) in wires.into_iter().enumerate() {
            let curves = self.wire_curves(store, wire)?;
            if curves.is_empty() {
                return Err(GeometryError::Degenerate(format!("loop {loop_index} has no curves")));
            }
            self.check_closed(loop_index, &curves)?;

            let role = if loop_index == 0 {
                LoopRole::Outer
            } else {
                LoopRole::Opening
            };
            let boundary = BoundaryLoop::new(role, curves);
            let polygon = boundary.polygon()?;

            if self.distinct_vertex_count(&polygon) < 3 {
                return Err(GeometryError::Degenerate(format!(
                    "loop {loop_index} has fewer than three distinct vertices"
                )));
            }

            let deviation = max_plane_deviation(&polygon, plane.origin(), &normal);
            if deviation > self.tolerance {
                return Err(GeometryError::NonPlanar {
                    loop_index,
                    deviation,
                });
            }

            let area = signed_area_about(&polygon, &normal);
            if area.abs() < self.tolerance * self.tolerance {
                return Err(GeometryError::Degenerate(format!(
                    "loop {loop_index} encloses no area"
                )));
            }

            let counter_clockwise = area > 0.0;
            let wants_counter_clockwise = role == LoopRole::Outer;
            loops.push(if counter_clockwise == wants_counter_clockwise {
                boundary
            } else {
                boundary.reversed()
            });
        }

        Ok(loops)
    }
}
