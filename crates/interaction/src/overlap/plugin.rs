use bevy::prelude::*;

use crate::bounding::cache_bounding_radii;
use crate::scene_state::SceneState;

use super::systems::{evaluate_overlaps, init_candidates};
use super::types::CollideEvent;

pub struct OverlapPlugin;

impl Plugin for OverlapPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollideEvent>()
            .add_systems(
                OnEnter(SceneState::Ready),
                (cache_bounding_radii, init_candidates),
            )
            .add_systems(
                Update,
                evaluate_overlaps.run_if(in_state(SceneState::Ready)),
            );
    }
}
