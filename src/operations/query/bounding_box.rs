use crate::error::{GeometryError, Result};
use crate::math::Point3;
use crate::topology::{EdgeCurve, FaceId, SolidId, TopologyStore};

/// Samples taken along each arc edge; enough to catch an arc's apex.
const ARC_SAMPLES: usize = 32;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    fn around(point: Point3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    fn include(&mut self, point: &Point3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    fn merge(&mut self, other: &Self) {
        self.include(&other.min);
        self.include(&other.max);
    }
}

enum Target {
    Faces(Vec<FaceId>),
    Solid(SolidId),
}

/// Computes the axis-aligned bounding box of a set of faces or of a solid.
///
/// Line edges contribute their end vertices; arc edges are sampled.
pub struct BoundingBox {
    target: Target,
}

impl BoundingBox {
    /// Creates a query over the boundaries of the given faces.
    #[must_use]
    pub fn faces(faces: Vec<FaceId>) -> Self {
        Self {
            target: Target::Faces(faces),
        }
    }

    /// Creates a query over every face of a solid.
    #[must_use]
    pub fn solid(solid: SolidId) -> Self {
        Self {
            target: Target::Solid(solid),
        }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] when there is nothing to bound,
    /// or a topology error for a dangling reference.
    pub fn execute(&self, store: &TopologyStore) -> Result<Aabb> {
        let faces = match &self.target {
            Target::Faces(faces) => faces.clone(),
            Target::Solid(solid) => store.solid_faces(*solid)?,
        };

        let mut bounds: Option<Aabb> = None;
        for face in faces {
            for wire in store.face_wires(face)? {
                for oe in &store.wire(wire)?.edges {
                    let edge_box = edge_bounds(store, oe.edge)?;
                    match bounds.as_mut() {
                        Some(b) => b.merge(&edge_box),
                        None => bounds = Some(edge_box),
                    }
                }
            }
        }

        bounds.ok_or_else(|| GeometryError::Degenerate("nothing to bound".into()).into())
    }
}

fn edge_bounds(store: &TopologyStore, edge_id: crate::topology::EdgeId) -> Result<Aabb> {
    let edge = store.edge(edge_id)?;
    let mut bounds = Aabb::around(store.vertex(edge.start)?.point);
    bounds.include(&store.vertex(edge.end)?.point);

    if let EdgeCurve::Arc(arc) = &edge.curve {
        use crate::geometry::curve::Curve;
        for i in 1..ARC_SAMPLES {
            #[allow(clippy::cast_precision_loss)]
            let frac = i as f64 / ARC_SAMPLES as f64;
            let t = edge.t_start + frac * (edge.t_end - edge.t_start);
            bounds.include(&arc.evaluate(t)?);
        }
    }

    Ok(bounds)
}
