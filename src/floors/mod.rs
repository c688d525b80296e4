//! Floor generation: turns per-story collections of building surfaces into
//! levels, floors and openings in a [`crate::document::Document`].

mod batch;
mod builder;
mod floor_type;
mod levels;

pub use batch::{CreateFloors, FloorBatch, SurfaceFailure};
pub use builder::{BuiltFloor, FloorBuilder};
pub use floor_type::FloorType;
pub use levels::{floor_elevation, LevelDirectory};

use crate::document::{FloorId, LevelId, OpeningId};
use crate::topology::FaceId;

/// The surfaces making up one physical story, in order.
#[derive(Debug, Clone, Default)]
pub struct BuildingFloor {
    pub surfaces: Vec<FaceId>,
}

impl BuildingFloor {
    /// Creates a building floor from its surfaces.
    #[must_use]
    pub fn new(surfaces: Vec<FaceId>) -> Self {
        Self { surfaces }
    }
}

/// A floor created in the document, with the level hosting it and the
/// openings cut into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorElement {
    pub floor: FloorId,
    pub level: LevelId,
    pub openings: Vec<OpeningId>,
}
