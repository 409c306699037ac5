//! Scene readiness state machine.
//!
//! Defines [`SceneState`], a Bevy [`States`] enum with two states: the scene
//! is `Loading` until every collidable entity's mesh asset is resolvable,
//! then `Ready` for the rest of its life. The `OnEnter(SceneState::Ready)`
//! schedule is the single-shot "scene fully loaded" notification that setup
//! systems hook into: Bevy fires it exactly once per transition, and
//! nothing in this crate ever transitions back to `Loading`.
//!
//! The state lives in its own module so every feature can gate on it
//! without circular imports.

use bevy::prelude::*;

use crate::overlap::{Collidable, OverlapTracker};

/// Scene lifecycle state. Collision setup and per-frame evaluation only run
/// in [`SceneState::Ready`].
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneState {
    /// Mesh assets are still being populated; the scene is not queryable.
    #[default]
    Loading,
    /// All collidable geometry is available; the subsystem is live.
    Ready,
}

/// Declares the scene ready once every collidable or tracked entity with a
/// mesh handle can resolve it in `Assets<Mesh>`.
///
/// Entities tagged collidable but carrying no `Mesh3d` at all do not hold
/// the scene in `Loading`: their missing geometry is a scene defect that
/// is surfaced when the radius cache is built, not a pending load.
pub fn check_scene_ready(
    collidables: Query<&Mesh3d, Or<(With<Collidable>, With<OverlapTracker>)>>,
    meshes: Res<Assets<Mesh>>,
    mut next: ResMut<NextState<SceneState>>,
) {
    let all_loaded = collidables
        .iter()
        .all(|mesh3d| meshes.contains(&mesh3d.0));
    if all_loaded {
        next.set(SceneState::Ready);
    }
}

pub struct SceneStatePlugin;

impl Plugin for SceneStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SceneState>().add_systems(
            Update,
            check_scene_ready.run_if(in_state(SceneState::Loading)),
        );
    }
}
