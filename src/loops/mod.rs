//! Boundary loops: the closed curve chains a floor outline or an opening is
//! built from.

mod extractor;

pub use extractor::{LoopExtractor, WireLoopExtractor};

use crate::error::GeometryError;
use crate::math::units::{point_to_model, MILLIMETERS_PER_FOOT};
use crate::math::Point3;
use crate::topology::EdgeCurve;

/// Arc subdivision used when a loop is flattened to a polygon.
pub const POLYGON_ARC_SEGMENTS: usize = 8;

/// What a loop bounds on its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopRole {
    /// The outer boundary (always the first loop of a surface).
    Outer,
    /// An interior hole.
    Opening,
}

/// One bounded curve of a loop, already oriented in loop order.
#[derive(Debug, Clone)]
pub struct LoopCurve {
    pub curve: EdgeCurve,
    pub t_start: f64,
    pub t_end: f64,
    pub start: Point3,
    pub end: Point3,
}

impl LoopCurve {
    /// The same curve traversed the other way.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            curve: self.curve,
            t_start: self.t_end,
            t_end: self.t_start,
            start: self.end,
            end: self.start,
        }
    }

    /// Converts from millimetres to model units.
    #[must_use]
    pub fn to_model_units(&self) -> Self {
        let (curve, param_scale) = self.curve.scaled(MILLIMETERS_PER_FOOT.recip());
        Self {
            curve,
            t_start: self.t_start * param_scale,
            t_end: self.t_end * param_scale,
            start: point_to_model(&self.start),
            end: point_to_model(&self.end),
        }
    }

    /// Appends the start point and, for arcs, interior samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve cannot be evaluated.
    pub fn sample_into(
        &self,
        arc_segments: usize,
        out: &mut Vec<Point3>,
    ) -> Result<(), GeometryError> {
        out.push(self.start);
        if let EdgeCurve::Arc(_) = self.curve {
            let curve = self.curve.as_curve();
            for i in 1..arc_segments {
                #[allow(clippy::cast_precision_loss)]
                let frac = i as f64 / arc_segments as f64;
                out.push(curve.evaluate(self.t_start + frac * (self.t_end - self.t_start))?);
            }
        }
        Ok(())
    }
}

/// A closed, planar, consistently oriented chain of curves.
///
/// Outer loops run counter-clockwise about their surface normal and
/// openings run clockwise.
#[derive(Debug, Clone)]
pub struct BoundaryLoop {
    role: LoopRole,
    curves: Vec<LoopCurve>,
}

impl BoundaryLoop {
    pub(crate) fn new(role: LoopRole, curves: Vec<LoopCurve>) -> Self {
        Self { role, curves }
    }

    /// Returns what this loop bounds.
    #[must_use]
    pub fn role(&self) -> LoopRole {
        self.role
    }

    /// Returns the curves in loop order.
    #[must_use]
    pub fn curves(&self) -> &[LoopCurve] {
        &self.curves
    }

    /// Returns the start point of every curve.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point3> {
        self.curves.iter().map(|c| c.start).collect()
    }

    /// Flattens the loop to a polygon, sampling arcs.
    ///
    /// # Errors
    ///
    /// Returns an error if a curve cannot be evaluated.
    pub fn polygon(&self) -> Result<Vec<Point3>, GeometryError> {
        let mut points = Vec::with_capacity(self.curves.len());
        for curve in &self.curves {
            curve.sample_into(POLYGON_ARC_SEGMENTS, &mut points)?;
        }
        Ok(points)
    }

    /// Converts the loop from millimetres to model units.
    #[must_use]
    pub fn to_model_units(&self) -> Self {
        Self {
            role: self.role,
            curves: self.curves.iter().map(LoopCurve::to_model_units).collect(),
        }
    }

    /// Reverses the traversal direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            role: self.role,
            curves: self.curves.into_iter().rev().map(LoopCurve::reversed).collect(),
        }
    }
}
