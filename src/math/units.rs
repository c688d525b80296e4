//! Conversion between the source geometry's millimetres and the target
//! model's internal length unit (decimal feet).

use super::Point3;

/// Millimetres in one foot.
pub const MILLIMETERS_PER_FOOT: f64 = 12.0 * 25.4;

/// Converts a length in millimetres to model units.
#[must_use]
pub fn mm_to_model(length: f64) -> f64 {
    length / MILLIMETERS_PER_FOOT
}

/// Converts a point in millimetres to model units.
#[must_use]
pub fn point_to_model(point: &Point3) -> Point3 {
    Point3::from(point.coords / MILLIMETERS_PER_FOOT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_foot() {
        assert_relative_eq!(mm_to_model(304.8), 1.0);
    }

    #[test]
    fn three_metres() {
        assert_relative_eq!(mm_to_model(3000.0), 9.842_519_685_039_37, epsilon = 1e-12);
    }

    #[test]
    fn point_scales_every_axis() {
        let p = point_to_model(&Point3::new(304.8, 609.6, -914.4));
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, -3.0);
    }
}
