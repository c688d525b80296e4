use crate::error::{GeometryError, Result};
use crate::geometry::curve::Line;
use crate::math::Point3;
use crate::topology::{
    EdgeCurve, EdgeData, OrientedEdge, TopologyStore, VertexData, WireData, WireId,
};

/// Creates a polyline wire of line edges from a sequence of 3D points.
pub struct MakeWire {
    points: Vec<Point3>,
    close: bool,
}

impl MakeWire {
    /// Creates a new `MakeWire` operation.
    ///
    /// When `close` is set, an edge from the last point back to the first is
    /// added; the first point must not be repeated at the end.
    #[must_use]
    pub fn new(points: Vec<Point3>, close: bool) -> Self {
        Self { points, close }
    }

    /// Executes the operation, creating the wire in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if there are too few points and
    /// [`GeometryError::ZeroVector`] if two consecutive points coincide.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        let min_points = if self.close { 3 } else { 2 };
        if self.points.len() < min_points {
            return Err(GeometryError::Degenerate(format!(
                "wire needs at least {min_points} points, got {}",
                self.points.len()
            ))
            .into());
        }

        let vertices: Vec<_> = self
            .points
            .iter()
            .map(|p| store.add_vertex(VertexData::new(*p)))
            .collect();

        let n = vertices.len();
        let segment_count = if self.close { n } else { n - 1 };
        let mut edges = Vec::with_capacity(segment_count);
        for i in 0..segment_count {
            let j = (i + 1) % n;
            let (line, t_end) = Line::through(self.points[i], self.points[j])?;
            let edge = store.add_edge(EdgeData {
                start: vertices[i],
                end: vertices[j],
                curve: EdgeCurve::Line(line),
                t_start: 0.0,
                t_end,
            });
            edges.push(OrientedEdge::new(edge, true));
        }

        Ok(store.add_wire(WireData {
            edges,
            is_closed: self.close,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::StoreysError;

    #[test]
    fn closed_triangle_has_three_edges() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let data = store.wire(wire).unwrap();
        assert_eq!(data.edges.len(), 3);
        assert!(data.is_closed);
    }

    #[test]
    fn open_polyline_has_one_fewer_edge() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            false,
        )
        .execute(&mut store)
        .unwrap();
        assert_eq!(store.wire(wire).unwrap().edges.len(), 2);
    }

    #[test]
    fn repeated_point_is_rejected() {
        let mut store = TopologyStore::new();
        let p = Point3::new(1.0, 1.0, 0.0);
        let result =
            MakeWire::new(vec![p, p, Point3::new(2.0, 0.0, 0.0)], true).execute(&mut store);
        assert!(matches!(
            result,
            Err(StoreysError::Geometry(GeometryError::ZeroVector))
        ));
    }

    #[test]
    fn closed_wire_needs_three_points() {
        let mut store = TopologyStore::new();
        let result = MakeWire::new(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            true,
        )
        .execute(&mut store);
        assert!(result.is_err());
    }
}
