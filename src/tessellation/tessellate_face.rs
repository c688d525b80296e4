use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::FixedFaceHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::GeometryError;
use crate::geometry::curve::Curve;
use crate::geometry::surface::{Plane, Surface};
use crate::loops::BoundaryLoop;
use crate::math::polygon_3d::newell_normal;
use crate::math::Point3;
use crate::topology::EdgeCurve;

use super::{TessellationParams, TriangleMesh};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a planar face given by its boundary loops.
///
/// The first loop is the outer boundary and the rest are holes. The mesh
/// normal follows the outer loop's winding.
pub struct TessellateFace<'a> {
    loops: &'a [BoundaryLoop],
    params: TessellationParams,
}

impl<'a> TessellateFace<'a> {
    /// Creates a new `TessellateFace` operation.
    #[must_use]
    pub fn new(loops: &'a [BoundaryLoop], params: TessellationParams) -> Self {
        Self { loops, params }
    }

    /// Executes the tessellation, returning a triangle mesh.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Tessellation`] if the loops cannot be
    /// triangulated (crossing boundaries, too few points) or enclose no
    /// triangles, and a geometry error if the outer loop has no area.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh, GeometryError> {
        let (outer, holes) = self
            .loops
            .split_first()
            .ok_or_else(|| GeometryError::Tessellation("face has no boundary loops".into()))?;

        let outer_3d = sample_loop(outer, &self.params)?;
        let normal = newell_normal(&outer_3d)?;
        let plane = Plane::from_normal(outer_3d[0], normal)?;

        let project = |p: &Point3| -> SpadePoint2<f64> {
            let d = p - plane.origin();
            SpadePoint2::new(d.dot(plane.u_dir()), d.dot(plane.v_dir()))
        };

        let mut cdt = Cdt::new();
        insert_constraint_loop(&mut cdt, &outer_3d.iter().map(&project).collect::<Vec<_>>())?;
        for hole in holes {
            let hole_2d: Vec<_> = sample_loop(hole, &self.params)?.iter().map(&project).collect();
            insert_constraint_loop(&mut cdt, &hole_2d)?;
        }

        let interior_faces = classify_interior_faces(&cdt);

        let mut mesh = TriangleMesh::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();

        for face_handle in cdt.inner_faces() {
            if !interior_faces.contains(&face_handle.fix().index()) {
                continue;
            }

            let mut tri_indices = [0u32; 3];
            for (i, vh) in face_handle.vertices().iter().enumerate() {
                let idx = vh.fix().index();
                let mesh_idx = if let Some(&existing) = vertex_map.get(&idx) {
                    existing
                } else {
                    let pos = vh.position();
                    let new_idx = mesh.vertices.len() as u32;
                    mesh.vertices.push(plane.evaluate(pos.x, pos.y)?);
                    mesh.normals.push(*plane.plane_normal());
                    vertex_map.insert(idx, new_idx);
                    new_idx
                };
                tri_indices[i] = mesh_idx;
            }
            mesh.indices.push(tri_indices);
        }

        if mesh.indices.is_empty() {
            return Err(GeometryError::Tessellation(
                "face produced no triangles".into(),
            ));
        }
        Ok(mesh)
    }
}

/// Flattens a loop to points, sampling arcs to within the tolerance.
///
/// Each curve contributes its start point and interior samples, so the
/// closing point is never repeated.
fn sample_loop(
    boundary: &BoundaryLoop,
    params: &TessellationParams,
) -> Result<Vec<Point3>, GeometryError> {
    let mut points = Vec::new();
    for curve in boundary.curves() {
        match &curve.curve {
            EdgeCurve::Line(_) => points.push(curve.start),
            EdgeCurve::Arc(arc) => {
                let n = arc_segments(arc.radius(), curve.t_start, curve.t_end, params);
                add_curve_samples(&mut points, arc, curve.t_start, curve.t_end, n)?;
            }
        }
    }
    Ok(points)
}

/// Computes the number of segments for an arc.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn arc_segments(radius: f64, t_start: f64, t_end: f64, params: &TessellationParams) -> usize {
    let sweep = (t_end - t_start).abs();
    if radius > params.tolerance {
        let half_angle = (1.0 - params.tolerance / radius).acos();
        let computed = (sweep / (2.0 * half_angle)).ceil() as usize;
        computed.clamp(params.min_segments, params.max_segments)
    } else {
        params.min_segments
    }
}

/// Adds sample points from a curve (excluding the last point to avoid duplicates).
fn add_curve_samples(
    points: &mut Vec<Point3>,
    curve: &dyn Curve,
    t_start: f64,
    t_end: f64,
    n: usize,
) -> Result<(), GeometryError> {
    for i in 0..n {
        #[allow(clippy::cast_precision_loss)]
        let frac = i as f64 / n as f64;
        points.push(curve.evaluate(t_start + frac * (t_end - t_start))?);
    }
    Ok(())
}

/// Inserts a closed polygon as constraint edges into the CDT.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[SpadePoint2<f64>]) -> Result<(), GeometryError> {
    if points.len() < 3 {
        return Err(GeometryError::Tessellation(
            "constraint loop needs at least 3 points".into(),
        ));
    }

    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt.insert(pt).map_err(|e: InsertionError| {
            GeometryError::Tessellation(format!("CDT insert: {e}"))
        })?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(GeometryError::Tessellation(
                "boundary loops cross each other".into(),
            ));
        }
        cdt.add_constraint(from, to);
    }

    Ok(())
}

/// Classifies which inner faces of the CDT are inside the polygon using flood-fill.
///
/// Starts from faces adjacent to the outer (infinite) face at depth 0. Each time
/// a constraint edge is crossed, depth increments. Odd depth = interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<spade::handles::InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() == outer_fix {
            if let Some(inner) = edge.rev().face().as_inner() {
                let idx = inner.fix().index();
                if depth_map.contains_key(&idx) {
                    continue;
                }
                let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
                depth_map.insert(idx, depth);
                if depth % 2 == 1 {
                    interior.insert(idx);
                }
                queue.push_back((inner.fix(), depth));
            }
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            if let Some(inner_neighbor) = edge.rev().face().as_inner() {
                let n_idx = inner_neighbor.fix().index();
                if depth_map.contains_key(&n_idx) {
                    continue;
                }
                let new_depth = if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    depth + 1
                } else {
                    depth
                };
                depth_map.insert(n_idx, new_depth);
                if new_depth % 2 == 1 {
                    interior.insert(n_idx);
                }
                queue.push_back((inner_neighbor.fix(), new_depth));
            }
        }
    }

    interior
}
