use super::face::FaceId;

slotmap::new_key_type! {
    /// Unique identifier for a shell in the topology store.
    pub struct ShellId;
}

slotmap::new_key_type! {
    /// Unique identifier for a solid in the topology store.
    pub struct SolidId;
}

/// A connected set of faces. Building masses are expected to be closed,
/// but open shells are representable so that conversion can fall back.
#[derive(Debug, Clone)]
pub struct ShellData {
    pub faces: Vec<FaceId>,
    /// Whether the shell claims to be watertight.
    pub is_closed: bool,
}

/// A volume bounded by an outer shell and optional void shells.
#[derive(Debug, Clone)]
pub struct SolidData {
    pub outer_shell: ShellId,
    pub inner_shells: Vec<ShellId>,
}
