use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};
use crate::topology::{ShellData, SolidId, TopologyStore};

use super::{MakeFace, MakeSolid, MakeWire};

/// Creates an axis-aligned box solid from two corner points.
///
/// Every face is wound counter-clockwise seen from outside, so face normals
/// point outward and each box edge is traversed once in each direction.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Executes the operation, creating the box in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the box is flat along any axis.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        let (lo, hi) = (self.min_corner, self.max_corner);
        if (hi - lo).iter().any(|d| *d < TOLERANCE) {
            return Err(GeometryError::Degenerate(
                "box max corner must exceed min corner on every axis".into(),
            )
            .into());
        }

        // Corner `i` takes the max coordinate on x, y, z for bits 0, 1, 2.
        let corner = |i: u8| {
            Point3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            )
        };

        // Counter-clockwise seen from outside: bottom, top, front, back, left, right.
        let quads: [[u8; 4]; 6] = [
            [0, 2, 3, 1],
            [4, 5, 7, 6],
            [0, 1, 5, 4],
            [2, 6, 7, 3],
            [0, 4, 6, 2],
            [1, 3, 7, 5],
        ];

        let mut faces = Vec::with_capacity(quads.len());
        for quad in quads {
            let wire = MakeWire::new(quad.map(corner).to_vec(), true).execute(store)?;
            faces.push(MakeFace::new(wire, vec![]).execute(store)?);
        }

        let shell = store.add_shell(ShellData {
            faces,
            is_closed: true,
        });
        MakeSolid::new(shell, vec![]).execute(store)
    }
}
