use crate::error::{Result, TopologyError};
use crate::geometry::surface::Plane;
use crate::math::polygon_3d::newell_normal;
use crate::topology::{FaceData, FaceId, TopologyStore, WireId};

/// Arc subdivision used when fitting the face plane.
const FIT_ARC_SEGMENTS: usize = 4;

/// Creates a planar face from an outer wire and optional hole wires.
///
/// The plane is fitted to the outer wire's vertices, so the face normal
/// follows the outer wire's winding (right-hand rule).
pub struct MakeFace {
    outer_wire: WireId,
    inner_wires: Vec<WireId>,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation.
    #[must_use]
    pub fn new(outer_wire: WireId, inner_wires: Vec<WireId>) -> Self {
        Self {
            outer_wire,
            inner_wires,
        }
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WireNotClosed`] if any wire is open and a
    /// geometry error if the outer wire encloses no area.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        for &wire in std::iter::once(&self.outer_wire).chain(&self.inner_wires) {
            if !store.wire(wire)?.is_closed {
                return Err(TopologyError::WireNotClosed.into());
            }
        }

        let points = store.sample_wire(self.outer_wire, FIT_ARC_SEGMENTS)?;
        let normal = newell_normal(&points)?;
        let plane = Plane::from_normal(points[0], normal)?;

        Ok(store.add_face(FaceData {
            plane,
            outer_wire: self.outer_wire,
            inner_wires: self.inner_wires.clone(),
            same_sense: true,
        }))
    }
}
