pub mod edge;
pub mod face;
pub mod solid;
pub mod wire;

pub use edge::{EdgeCurve, EdgeData, EdgeId, VertexData, VertexId};
pub use face::{FaceData, FaceId};
pub use solid::{ShellData, ShellId, SolidData, SolidId};
pub use wire::{OrientedEdge, WireData, WireId};

use crate::error::{GeometryError, TopologyError};
use crate::geometry::curve::Curve;
use crate::math::Point3;
use slotmap::SlotMap;

/// Central arena that owns the source geometry handed in by the host.
///
/// Building surfaces are faces and building solids are solids in this store.
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    solids: SlotMap<SolidId, SolidData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    // --- Edge operations ---

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    // --- Wire operations ---

    /// Inserts a wire and returns its ID.
    pub fn add_wire(&mut self, data: WireData) -> WireId {
        self.wires.insert(data)
    }

    /// Returns a reference to the wire data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wire(&self, id: WireId) -> Result<&WireData, TopologyError> {
        self.wires
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wire".into()))
    }

    // --- Face operations ---

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    // --- Shell operations ---

    /// Inserts a shell and returns its ID.
    pub fn add_shell(&mut self, data: ShellData) -> ShellId {
        self.shells.insert(data)
    }

    /// Returns a reference to the shell data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shell(&self, id: ShellId) -> Result<&ShellData, TopologyError> {
        self.shells
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("shell".into()))
    }

    // --- Solid operations ---

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        self.solids.insert(data)
    }

    /// Returns a reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, TopologyError> {
        self.solids
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("solid".into()))
    }

    // --- Traversal ---

    /// Returns the faces of every shell of a solid, outer shell first.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or one of its shells is not found.
    pub fn solid_faces(&self, id: SolidId) -> Result<Vec<FaceId>, TopologyError> {
        let solid = self.solid(id)?;
        let mut faces = Vec::new();
        let shells = std::iter::once(solid.outer_shell).chain(solid.inner_shells.iter().copied());
        for shell_id in shells {
            faces.extend_from_slice(&self.shell(shell_id)?.faces);
        }
        Ok(faces)
    }

    /// Returns the boundary wires of a face, outer wire first.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found.
    pub fn face_wires(&self, id: FaceId) -> Result<Vec<WireId>, TopologyError> {
        let face = self.face(id)?;
        let mut wires = Vec::with_capacity(1 + face.inner_wires.len());
        wires.push(face.outer_wire);
        wires.extend_from_slice(&face.inner_wires);
        Ok(wires)
    }

    /// Samples a wire as a closed polyline in traversal order.
    ///
    /// Each oriented edge contributes its start point; arc edges also
    /// contribute `arc_segments - 1` interior points. End points are left out
    /// so consecutive edges do not duplicate their shared vertex.
    ///
    /// # Errors
    ///
    /// Returns an error for a dangling reference or a curve that cannot be
    /// evaluated.
    pub fn sample_wire(
        &self,
        id: WireId,
        arc_segments: usize,
    ) -> Result<Vec<Point3>, GeometryError> {
        let edges = &self.wire(id)?.edges;
        let mut points = Vec::with_capacity(edges.len());
        for oe in edges {
            let edge = self.edge(oe.edge)?;
            let (start, t_start, t_end) = if oe.forward {
                (edge.start, edge.t_start, edge.t_end)
            } else {
                (edge.end, edge.t_end, edge.t_start)
            };
            points.push(self.vertex(start)?.point);
            if let EdgeCurve::Arc(arc) = &edge.curve {
                for i in 1..arc_segments {
                    #[allow(clippy::cast_precision_loss)]
                    let frac = i as f64 / arc_segments as f64;
                    points.push(arc.evaluate(t_start + frac * (t_end - t_start))?);
                }
            }
        }
        Ok(points)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeBox, MakeFace, MakeWire};

    #[test]
    fn null_key_is_not_found() {
        let store = TopologyStore::new();
        assert!(matches!(
            store.face(FaceId::default()),
            Err(TopologyError::EntityNotFound(_))
        ));
        assert!(store.solid_faces(SolidId::default()).is_err());
    }

    #[test]
    fn face_wires_lists_outer_first() {
        let mut store = TopologyStore::new();
        let outer = MakeWire::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(10.0, 10.0, 0.0),
                Point3::new(0.0, 10.0, 0.0),
            ],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let hole = MakeWire::new(
            vec![
                Point3::new(2.0, 2.0, 0.0),
                Point3::new(2.0, 4.0, 0.0),
                Point3::new(4.0, 4.0, 0.0),
            ],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let face = MakeFace::new(outer, vec![hole]).execute(&mut store).unwrap();
        assert_eq!(store.face_wires(face).unwrap(), vec![outer, hole]);
    }

    #[test]
    fn box_solid_has_six_faces() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::origin(), Point3::new(1.0, 2.0, 3.0))
            .execute(&mut store)
            .unwrap();
        assert_eq!(store.solid_faces(solid).unwrap().len(), 6);
    }
}
