use crate::config::FloorOptions;
use crate::document::{Document, ElementTypeId};
use crate::error::ArgumentError;

/// A floor construction template that has been checked against the document.
///
/// Only [`FloorType::resolve`] hands these out, so holding one means the
/// type exists and belongs to a floor family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorType {
    id: ElementTypeId,
}

impl FloorType {
    /// Resolves the requested type, falling back to the configured default.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] if no type was requested and none is
    /// configured, the type is not in the document, or it is not a floor type.
    pub fn resolve(
        doc: &Document,
        requested: Option<ElementTypeId>,
        options: &FloorOptions,
    ) -> Result<Self, ArgumentError> {
        let id = match (requested, options.default_floor_type.as_deref()) {
            (Some(id), _) => id,
            (None, Some(name)) => doc
                .element_type_by_name(name)
                .ok_or_else(|| ArgumentError::FloorTypeNotFound(name.to_owned()))?,
            (None, None) => return Err(ArgumentError::MissingInput("floor_type")),
        };

        let data = doc
            .element_type(id)
            .map_err(|_| ArgumentError::UnknownElementType)?;
        if !data.family.is_floor_construction() {
            return Err(ArgumentError::UnrecognizedFloorType {
                name: data.name.clone(),
                family: data.family,
            });
        }
        Ok(Self { id })
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(id: ElementTypeId) -> Self {
        Self { id }
    }

    /// The underlying element type.
    #[must_use]
    pub fn id(self) -> ElementTypeId {
        self.id
    }
}
