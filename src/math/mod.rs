pub mod polygon_3d;
pub mod units;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for loop closure and planarity checks, in source length units.
///
/// Surfaces arrive in millimetres, so this is a micrometre.
pub const LOOP_TOLERANCE: f64 = 1e-3;
