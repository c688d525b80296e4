use crate::document::ShapeGeometry;
use crate::error::GeometryError;
use crate::loops::WireLoopExtractor;
use crate::tessellation::{TessellateFace, TessellationParams, TriangleMesh};
use crate::topology::{SolidId, TopologyStore};

use super::{model_face_loops, ShapeConversion};

/// Approximates the solid with triangles, one planar triangulation per face.
///
/// Shells do not need to be closed, but every face must triangulate.
#[derive(Debug, Default)]
pub struct MeshConversion {
    extractor: WireLoopExtractor,
    params: TessellationParams,
}

impl ShapeConversion for MeshConversion {
    fn name(&self) -> &'static str {
        "mesh"
    }

    fn convert(
        &self,
        store: &TopologyStore,
        solid: SolidId,
    ) -> Result<ShapeGeometry, GeometryError> {
        let mut mesh = TriangleMesh::default();
        for face in store.solid_faces(solid)? {
            let loops = model_face_loops(&self.extractor, store, face)?;
            mesh.append(TessellateFace::new(&loops, self.params).execute()?);
        }
        if mesh.indices.is_empty() {
            return Err(GeometryError::Tessellation("solid has no faces".into()));
        }
        Ok(ShapeGeometry::Mesh(mesh))
    }
}
