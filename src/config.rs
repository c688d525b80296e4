use serde::Deserialize;

use crate::error::Result;

/// Level name prefix used when the caller does not supply one.
pub const DEFAULT_LEVEL_PREFIX: &str = "Dynamo Level";

/// What the floor batch does when a surface cannot be decomposed into loops.
///
/// Work committed before the failure is kept in every mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryFailurePolicy {
    /// Skip the surface and carry on with its siblings and later floors.
    #[default]
    SkipSurface,
    /// Skip the rest of the floor and carry on with the next floor.
    AbortFloor,
    /// Stop the batch and report the failing floor and surface.
    AbortBatch,
}

/// Host-supplied options for floor generation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FloorOptions {
    /// Generated levels are named `"{level_prefix} {n}"`, `n` starting at 1.
    pub level_prefix: String,
    /// Name of the floor type to use when the caller passes none.
    pub default_floor_type: Option<String>,
    pub on_geometry_error: GeometryFailurePolicy,
}

impl Default for FloorOptions {
    fn default() -> Self {
        Self {
            level_prefix: DEFAULT_LEVEL_PREFIX.to_owned(),
            default_floor_type: None,
            on_geometry_error: GeometryFailurePolicy::default(),
        }
    }
}

impl FloorOptions {
    /// Parses options from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreysError::Config`] for malformed JSON or unknown
    /// fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the level name prefix.
    #[must_use]
    pub fn with_level_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.level_prefix = prefix.into();
        self
    }

    /// Sets the fallback floor type name.
    #[must_use]
    pub fn with_default_floor_type(mut self, name: impl Into<String>) -> Self {
        self.default_floor_type = Some(name.into());
        self
    }

    /// Sets the geometry failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: GeometryFailurePolicy) -> Self {
        self.on_geometry_error = policy;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::StoreysError;

    #[test]
    fn defaults() {
        let options = FloorOptions::default();
        assert_eq!(options.level_prefix, "Dynamo Level");
        assert_eq!(options.default_floor_type, None);
        assert_eq!(options.on_geometry_error, GeometryFailurePolicy::SkipSurface);
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(FloorOptions::from_json("{}").unwrap(), FloorOptions::default());
    }

    #[test]
    fn partial_json() {
        let options = FloorOptions::from_json(
            r#"{ "default_floor_type": "Generic 300mm", "on_geometry_error": "abort_floor" }"#,
        )
        .unwrap();
        assert_eq!(options.level_prefix, DEFAULT_LEVEL_PREFIX);
        assert_eq!(options.default_floor_type.as_deref(), Some("Generic 300mm"));
        assert_eq!(options.on_geometry_error, GeometryFailurePolicy::AbortFloor);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = FloorOptions::from_json(r#"{ "level_suffix": "x" }"#);
        assert!(matches!(result, Err(StoreysError::Config(_))));
    }
}
