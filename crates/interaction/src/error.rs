// ---------------------------------------------------------------------------
// InteractionError: typed errors for scene-construction defects
// ---------------------------------------------------------------------------

use std::fmt;

use bevy::prelude::Entity;

/// Errors raised while wiring the interaction subsystem to a scene.
///
/// Both variants indicate a defect in how the scene was constructed, not a
/// runtime condition this crate can recover from: they are logged where
/// they occur and the affected entity or relay is left out of play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    /// An entity participates in overlap tracking but has no usable mesh
    /// geometry (no `Mesh3d`, an unresolvable handle, or a mesh without
    /// vertex positions).
    MissingGeometry(Entity),
    /// No entity matched the orchestra's conductor selector at setup time.
    /// The selector query runs once, so the relay stays inert.
    ConductorNotFound(String),
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionError::MissingGeometry(entity) => {
                write!(f, "entity {entity} has no mesh geometry to derive a bounding sphere from")
            }
            InteractionError::ConductorNotFound(selector) => {
                if selector.is_empty() {
                    write!(f, "no conductor entity present in the scene")
                } else {
                    write!(f, "no conductor entity matches selector '{selector}'")
                }
            }
        }
    }
}

impl std::error::Error for InteractionError {}
