use crate::loops::BoundaryLoop;
use crate::tessellation::TriangleMesh;

slotmap::new_key_type! {
    /// Unique identifier for a level in the document.
    pub struct LevelId;
}

slotmap::new_key_type! {
    /// Unique identifier for an element type (construction template).
    pub struct ElementTypeId;
}

slotmap::new_key_type! {
    /// Unique identifier for a floor element.
    pub struct FloorId;
}

slotmap::new_key_type! {
    /// Unique identifier for an opening cut into a floor.
    pub struct OpeningId;
}

slotmap::new_key_type! {
    /// Unique identifier for a direct shape (mass) element.
    pub struct ShapeId;
}

/// A named horizontal datum that floors are hosted on.
#[derive(Debug, Clone)]
pub struct LevelData {
    pub name: String,
    /// Elevation in model units (feet).
    pub elevation: f64,
}

/// The family an element type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Floor,
    FoundationSlab,
    Wall,
    Roof,
    Ceiling,
}

impl TypeFamily {
    /// Whether a floor can be built from a type of this family.
    #[must_use]
    pub fn is_floor_construction(self) -> bool {
        matches!(self, Self::Floor | Self::FoundationSlab)
    }
}

/// A read-only construction template supplied by the host.
#[derive(Debug, Clone)]
pub struct ElementTypeData {
    pub name: String,
    pub family: TypeFamily,
}

/// A floor slab hosted on a level.
#[derive(Debug, Clone)]
pub struct FloorData {
    pub level: LevelId,
    pub floor_type: ElementTypeId,
    /// Outer boundary, in model units.
    pub outline: BoundaryLoop,
    pub openings: Vec<OpeningId>,
}

/// A hole cut through a floor.
#[derive(Debug, Clone)]
pub struct OpeningData {
    pub floor: FloorId,
    /// Hole boundary, in model units.
    pub boundary: BoundaryLoop,
}

/// Category a direct shape is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeCategory {
    Mass,
    GenericModel,
}

/// Exact boundary representation of a converted solid.
#[derive(Debug, Clone, Default)]
pub struct BrepShape {
    /// Per face: outer loop first, then holes. Model units.
    pub faces: Vec<Vec<BoundaryLoop>>,
}

/// Geometry carried by a direct shape.
#[derive(Debug, Clone)]
pub enum ShapeGeometry {
    Brep(BrepShape),
    Mesh(TriangleMesh),
}

/// A free-form element built from a solid.
#[derive(Debug, Clone)]
pub struct DirectShapeData {
    pub category: ShapeCategory,
    pub geometry: ShapeGeometry,
}

/// A reference to any element of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKey {
    Level(LevelId),
    ElementType(ElementTypeId),
    Floor(FloorId),
    Opening(OpeningId),
    Shape(ShapeId),
}
