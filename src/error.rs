use thiserror::Error;

/// Top-level error type for floor and mass generation.
#[derive(Debug, Error)]
pub enum StoreysError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A surface failed and the batch was aborted at that point.
    #[error("floor {floor}, surface {surface}: {source}")]
    Surface {
        floor: usize,
        surface: usize,
        #[source]
        source: GeometryError,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Invalid or missing caller input, always raised before the model is touched.
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("required input `{0}` is missing")]
    MissingInput(&'static str),

    #[error("building floor {index} is null")]
    NullFloor { index: usize },

    #[error("building floor {index} has no surfaces")]
    EmptyFloor { index: usize },

    #[error("element type `{name}` is not a floor type ({family:?})")]
    UnrecognizedFloorType {
        name: String,
        family: crate::document::TypeFamily,
    },

    #[error("no floor type named `{0}` in the document")]
    FloorTypeNotFound(String),

    #[error("element type does not exist in the document")]
    UnknownElementType,
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("loop {loop_index} is not closed (gap of {gap:.3e} after curve {curve_index})")]
    OpenLoop {
        loop_index: usize,
        curve_index: usize,
        gap: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("loop {loop_index} is not planar (deviation {deviation:.3e})")]
    NonPlanar { loop_index: usize, deviation: f64 },

    #[error("zero-length vector")]
    ZeroVector,

    #[error("floor outline is not horizontal (normal tilt {tilt:.3e})")]
    NotHorizontal { tilt: f64 },

    #[error("opening loop {loop_index} is not inside the floor boundary")]
    OpeningOutsideFloor { loop_index: usize },

    #[error("tessellation failed: {0}")]
    Tessellation(String),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Errors related to the input topology store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wire is not closed")]
    WireNotClosed,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors raised by the target model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model element not found: {0}")]
    EntityNotFound(&'static str),

    #[error("a level named `{0}` already exists")]
    DuplicateLevelName(String),

    #[error("floor has not been committed; openings need a committed floor")]
    FloorNotCommitted,
}

/// One failed attempt of a shape conversion strategy.
#[derive(Debug)]
pub struct ConversionAttempt {
    /// Name of the strategy that was tried.
    pub strategy: &'static str,
    /// Why it failed.
    pub cause: GeometryError,
}

/// Every conversion strategy failed.
///
/// The first (primary) failure is reported as the error source; the full
/// attempt log is kept in `attempts`.
#[derive(Debug)]
pub struct ConversionError {
    pub attempts: Vec<ConversionAttempt>,
}

impl ConversionError {
    /// Returns the failure of the first strategy tried.
    #[must_use]
    pub fn primary(&self) -> Option<&GeometryError> {
        self.attempts.first().map(|a| &a.cause)
    }
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.attempts.first() {
            Some(first) => write!(
                f,
                "shape conversion failed after {} attempt(s); {} failed with: {}",
                self.attempts.len(),
                first.strategy,
                first.cause
            ),
            None => f.write_str("shape conversion failed: no strategies configured"),
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.primary().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Convenience type alias for results using [`StoreysError`].
pub type Result<T> = std::result::Result<T, StoreysError>;
