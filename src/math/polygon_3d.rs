use crate::error::GeometryError;
use crate::geometry::surface::Plane;

use super::{Point3, Vector3, TOLERANCE};

/// Projects a 3D point onto the UV coordinate system of a plane.
///
/// Returns `(u, v)` coordinates.
#[must_use]
fn project_to_uv(point: &Point3, plane: &Plane) -> (f64, f64) {
    let diff = point - plane.origin();
    let u = diff.dot(plane.u_dir());
    let v = diff.dot(plane.v_dir());
    (u, v)
}

/// Point-in-polygon test for a 3D point coplanar with the polygon.
///
/// Projects to the plane's UV coordinate space and uses the winding number
/// algorithm. Returns `true` if the point is inside or on the boundary.
#[must_use]
pub fn point_in_polygon_3d(point: &Point3, polygon: &[Point3], plane: &Plane) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let (px, py) = project_to_uv(point, plane);
    let uvs: Vec<(f64, f64)> = polygon.iter().map(|p| project_to_uv(p, plane)).collect();

    winding_number_2d(px, py, &uvs) != 0 || on_boundary_2d(px, py, &uvs)
}

/// Winding number of point `(px, py)` with respect to polygon `verts`.
///
/// Non-zero => inside, zero => outside.
fn winding_number_2d(px: f64, py: f64, verts: &[(f64, f64)]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let (x0, y0) = verts[i];
        let (x1, y1) = verts[(i + 1) % n];

        if y0 <= py {
            if y1 > py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) > 0.0 {
                winding += 1;
            }
        } else if y1 <= py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

fn on_boundary_2d(px: f64, py: f64, verts: &[(f64, f64)]) -> bool {
    let n = verts.len();
    (0..n).any(|i| {
        let (x0, y0) = verts[i];
        let (x1, y1) = verts[(i + 1) % n];
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len_sq = dx * dx + dy * dy;
        if len_sq < TOLERANCE {
            return false;
        }
        let t = ((px - x0) * dx + (py - y0) * dy) / len_sq;
        if !(0.0..=1.0).contains(&t) {
            return false;
        }
        cross_2d(dx, dy, px - x0, py - y0).abs() / len_sq.sqrt() < 1e-9
    })
}

/// Returns `true` if an edge of polygon `first` properly crosses an edge of
/// polygon `second`, both coplanar with `plane`.
///
/// Edges that merely touch at an endpoint or run along each other do not
/// count as crossing.
#[must_use]
pub fn polygons_cross_3d(first: &[Point3], second: &[Point3], plane: &Plane) -> bool {
    let first: Vec<(f64, f64)> = first.iter().map(|p| project_to_uv(p, plane)).collect();
    let second: Vec<(f64, f64)> = second.iter().map(|p| project_to_uv(p, plane)).collect();
    let crosses = edges_2d(&first).any(|(p0, p1)| {
        edges_2d(&second).any(|(q0, q1)| segments_cross_2d(p0, p1, q0, q1))
    });
    crosses
}

fn edges_2d(verts: &[(f64, f64)]) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
    let n = verts.len();
    (0..n).map(move |i| (verts[i], verts[(i + 1) % n]))
}

/// Proper intersection of segments `p0p1` and `q0q1`: each segment's ends lie
/// strictly on opposite sides of the other's line.
fn segments_cross_2d(p0: (f64, f64), p1: (f64, f64), q0: (f64, f64), q1: (f64, f64)) -> bool {
    let straddles = |from: (f64, f64), to: (f64, f64), end0: (f64, f64), end1: (f64, f64)| {
        let side0 = side_2d(from, to, end0);
        let side1 = side_2d(from, to, end1);
        (side0 > 0 && side1 < 0) || (side0 < 0 && side1 > 0)
    };
    straddles(q0, q1, p0, p1) && straddles(p0, p1, q0, q1)
}

/// Which side of the line `a -> b` the point `c` lies on: `1` left, `-1`
/// right, `0` on the line (or a degenerate line).
fn side_2d(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> i8 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len < TOLERANCE {
        return 0;
    }
    let dist = cross_2d(dx, dy, c.0 - a.0, c.1 - a.1) / len;
    if dist > 1e-9 {
        1
    } else if dist < -1e-9 {
        -1
    } else {
        0
    }
}

/// 2D cross product: `(ax * by - ay * bx)`.
#[inline]
fn cross_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// Computes the unnormalized area vector of a polygon using Newell's method.
///
/// Its length is twice the polygon area and its direction follows the
/// right-hand rule over the vertex order.
#[must_use]
pub fn newell_vector(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

/// Computes the unit normal of a polygon using Newell's method.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if the polygon has no area.
pub fn newell_normal(points: &[Point3]) -> Result<Vector3, GeometryError> {
    let normal = newell_vector(points);
    let len = normal.norm();
    if len < TOLERANCE {
        return Err(GeometryError::Degenerate(
            "polygon has zero area: cannot compute normal".into(),
        ));
    }
    Ok(normal / len)
}

/// Signed area of a polygon as seen from `normal`.
///
/// Positive when the vertices run counter-clockwise about `normal`.
#[must_use]
pub fn signed_area_about(points: &[Point3], normal: &Vector3) -> f64 {
    0.5 * newell_vector(points).dot(normal)
}

/// Largest distance of any point from the plane through `origin` with `normal`.
#[must_use]
pub fn max_plane_deviation(points: &[Point3], origin: &Point3, normal: &Vector3) -> f64 {
    points
        .iter()
        .map(|p| (p - origin).dot(normal).abs())
        .fold(0.0, f64::max)
}
