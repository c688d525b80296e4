use crate::error::GeometryError;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// An infinite line defined by an origin point and a unit direction vector.
///
/// The parametric form is: `P(t) = origin + t * direction`, so `t` measures
/// arc length from the origin.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Point3,
    direction: Vector3,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self, GeometryError> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector);
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Creates the line through `start` and `end`, returning it with the
    /// parameter of `end` (the parameter of `start` is `0`).
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn through(start: Point3, end: Point3) -> Result<(Self, f64), GeometryError> {
        let line = Self::new(start, end - start)?;
        Ok((line, (end - start).norm()))
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Returns this line scaled about the world origin.
    ///
    /// Parameters scale by the same factor, since `t` is a length.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            origin: Point3::from(self.origin.coords * factor),
            direction: self.direction,
        }
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Result<Point3, GeometryError> {
        Ok(self.origin + self.direction * t)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn is_closed(&self) -> bool {
        false
    }
}
