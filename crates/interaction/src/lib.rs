//! # Interaction — proximity tracking for a live 3D stage
//!
//! Tracks spatial overlap between tracked entities and the collidable
//! entities around them, emitting a [`CollideEvent`](overlap::CollideEvent)
//! exactly once per apart-to-overlapping transition. Also hosts the
//! orchestra relay, which forwards a conductor's cue as a play signal.
//!
//! Everything is frame-driven: the host schedule invokes the evaluation
//! systems once per update, and no system here blocks, suspends, or owns a
//! loop of its own.

use bevy::prelude::*;

pub mod bounding;
pub mod error;
pub mod orchestra;
pub mod overlap;
pub mod scene_state;
pub mod settings;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use error::InteractionError;
pub use scene_state::SceneState;
pub use settings::StageSettings;

/// Aggregates every feature plugin in this crate.
///
/// Requires `StatesPlugin` and an asset backend for `Assets<Mesh>` to be
/// installed first; `DefaultPlugins` provides both. Headless callers (see
/// `test_harness`) add `StatesPlugin`, `TransformPlugin`, and `AssetPlugin`
/// themselves.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StageSettings>();
        app.add_plugins((
            scene_state::SceneStatePlugin,
            overlap::OverlapPlugin,
            orchestra::OrchestraPlugin,
        ));
    }
}
