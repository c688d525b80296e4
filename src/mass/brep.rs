use std::collections::HashMap;

use crate::document::{BrepShape, ShapeGeometry};
use crate::error::GeometryError;
use crate::loops::{BoundaryLoop, LoopCurve, WireLoopExtractor};
use crate::math::Point3;
use crate::topology::{SolidId, TopologyStore};

use super::{model_face_loops, ShapeConversion};

/// Grid used to match boundary segments between faces, in model units.
const SEAM_TOLERANCE: f64 = 1e-6;

type GridPoint = [i64; 3];

/// Keeps the solid as exact faces bounded by their loops.
///
/// Every face must decompose into loops, and every shell that claims to be
/// closed must be watertight: each boundary segment is shared by exactly two
/// faces that run it in opposite directions.
#[derive(Debug, Default)]
pub struct BrepConversion {
    extractor: WireLoopExtractor,
}

impl ShapeConversion for BrepConversion {
    fn name(&self) -> &'static str {
        "brep"
    }

    fn convert(
        &self,
        store: &TopologyStore,
        solid: SolidId,
    ) -> Result<ShapeGeometry, GeometryError> {
        let data = store.solid(solid)?;
        let mut faces = Vec::new();
        for shell_id in std::iter::once(data.outer_shell).chain(data.inner_shells.iter().copied()) {
            let shell = store.shell(shell_id)?;
            let mut shell_faces = Vec::with_capacity(shell.faces.len());
            for &face in &shell.faces {
                shell_faces.push(model_face_loops(&self.extractor, store, face)?);
            }
            if shell.is_closed {
                check_watertight(&shell_faces)?;
            }
            faces.extend(shell_faces);
        }
        if faces.is_empty() {
            return Err(GeometryError::Degenerate("solid has no faces".into()));
        }
        Ok(ShapeGeometry::Brep(BrepShape { faces }))
    }
}

/// Checks that every segment of a closed shell is used once in each direction.
fn check_watertight(faces: &[Vec<BoundaryLoop>]) -> Result<(), GeometryError> {
    // Keyed by the segment's undirected ends and its midpoint; counts uses
    // running low-to-high and high-to-low.
    let mut uses: HashMap<(GridPoint, GridPoint, GridPoint), (usize, usize)> = HashMap::new();
    for boundary in faces.iter().flatten() {
        for curve in boundary.curves() {
            let (start, end) = (snap(&curve.start), snap(&curve.end));
            let mid = snap(&midpoint(curve)?);
            let entry = if start <= end {
                let e = uses.entry((start, end, mid)).or_default();
                &mut e.0
            } else {
                let e = uses.entry((end, start, mid)).or_default();
                &mut e.1
            };
            *entry += 1;
        }
    }
    let unmatched = uses.values().filter(|&&(a, b)| (a, b) != (1, 1)).count();
    if unmatched > 0 {
        return Err(GeometryError::Degenerate(format!(
            "closed shell is not watertight: {unmatched} unmatched boundary segment(s)"
        )));
    }
    Ok(())
}

fn midpoint(curve: &LoopCurve) -> Result<Point3, GeometryError> {
    curve
        .curve
        .as_curve()
        .evaluate(0.5 * (curve.t_start + curve.t_end))
}

#[allow(clippy::cast_possible_truncation)]
fn snap(p: &Point3) -> GridPoint {
    [p.x, p.y, p.z].map(|c| (c / SEAM_TOLERANCE).round() as i64)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::{MakeBox, MakeSolid};
    use crate::topology::ShellData;
    use approx::assert_relative_eq;

    fn boxed(store: &mut TopologyStore) -> SolidId {
        MakeBox::new(Point3::origin(), Point3::new(3_048.0, 3_048.0, 3_048.0))
            .execute(store)
            .unwrap()
    }

    #[test]
    fn closed_box_is_watertight() {
        let mut store = TopologyStore::new();
        let solid = boxed(&mut store);
        let geometry = BrepConversion::default().convert(&store, solid).unwrap();
        let ShapeGeometry::Brep(brep) = geometry else {
            panic!("expected a brep");
        };
        assert_eq!(brep.faces.len(), 6);
        let far = brep
            .faces
            .iter()
            .flatten()
            .flat_map(BoundaryLoop::vertices)
            .map(|v| v.x)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(far, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn box_missing_a_face_is_not_watertight() {
        let mut store = TopologyStore::new();
        let full = boxed(&mut store);
        let mut faces = store.solid_faces(full).unwrap();
        faces.pop();
        let shell = store.add_shell(ShellData {
            faces,
            is_closed: true,
        });
        let open = MakeSolid::new(shell, vec![]).execute(&mut store).unwrap();
        let result = BrepConversion::default().convert(&store, open);
        assert!(matches!(
            result,
            Err(GeometryError::Degenerate(msg)) if msg.contains("watertight")
        ));
    }

    #[test]
    fn open_shell_is_not_checked() {
        let mut store = TopologyStore::new();
        let full = boxed(&mut store);
        let mut faces = store.solid_faces(full).unwrap();
        faces.truncate(3);
        let shell = store.add_shell(ShellData {
            faces,
            is_closed: false,
        });
        let solid = MakeSolid::new(shell, vec![]).execute(&mut store).unwrap();
        assert!(BrepConversion::default().convert(&store, solid).is_ok());
    }
}
