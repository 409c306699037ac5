//! # TestStage — headless integration test harness
//!
//! Provides a fluent wrapper around `bevy::app::App` + `InteractionPlugin`
//! for running integration tests (and the overlap benchmark) without a
//! window or renderer.

use std::collections::HashSet;

use bevy::app::App;
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::transform::TransformPlugin;

use crate::orchestra::{Conductor, ConductEvent, Orchestra, PlayEvent};
use crate::overlap::{Collidable, CollideEvent, OverlapTracker};
use crate::scene_state::SceneState;
use crate::InteractionPlugin;

/// Capture of every `CollideEvent` sent so far.
#[derive(Resource, Default)]
pub struct CollideLog(pub Vec<CollideEvent>);

/// Capture of every `PlayEvent` sent so far.
#[derive(Resource, Default)]
pub struct PlayLog(pub Vec<PlayEvent>);

fn capture_collides(mut events: EventReader<CollideEvent>, mut log: ResMut<CollideLog>) {
    log.0.extend(events.read().copied());
}

fn capture_plays(mut events: EventReader<PlayEvent>, mut log: ResMut<PlayLog>) {
    log.0.extend(events.read().copied());
}

/// A headless Bevy App wrapping `InteractionPlugin`.
///
/// Spawn entities with the builder methods, call [`settle`](Self::settle)
/// to reach `SceneState::Ready`, then [`tick`](Self::tick) frames and
/// assert on captured events and tracker state.
pub struct TestStage {
    app: App,
}

impl Default for TestStage {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStage {
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            TransformPlugin,
            AssetPlugin::default(),
            StatesPlugin,
        ));
        app.init_asset::<Mesh>();
        app.add_plugins(InteractionPlugin);
        app.init_resource::<CollideLog>();
        app.init_resource::<PlayLog>();
        // Capture after the emitters so a single tick observes that
        // frame's events.
        app.add_systems(
            Update,
            (
                capture_collides.after(crate::overlap::evaluate_overlaps),
                capture_plays.after(crate::orchestra::forward_conduct),
            ),
        );
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Entity spawning
    // -----------------------------------------------------------------------

    fn add_sphere_mesh(&mut self, radius: f32) -> Handle<Mesh> {
        self.app
            .world_mut()
            .resource_mut::<Assets<Mesh>>()
            .add(Sphere::new(radius))
    }

    /// Spawn a tracked probe: an `OverlapTracker` with a sphere mesh.
    pub fn spawn_probe(&mut self, pos: Vec3, radius: f32) -> Entity {
        let mesh = self.add_sphere_mesh(radius);
        self.app
            .world_mut()
            .spawn((
                OverlapTracker::default(),
                Mesh3d(mesh),
                Transform::from_translation(pos),
                GlobalTransform::from_translation(pos),
            ))
            .id()
    }

    /// Spawn a collidable instrument with a sphere mesh.
    pub fn spawn_instrument(&mut self, pos: Vec3, radius: f32) -> Entity {
        let mesh = self.add_sphere_mesh(radius);
        self.app
            .world_mut()
            .spawn((
                Collidable,
                Mesh3d(mesh),
                Transform::from_translation(pos),
                GlobalTransform::from_translation(pos),
            ))
            .id()
    }

    /// Spawn an entity tagged collidable but carrying no mesh at all.
    pub fn spawn_meshless_collidable(&mut self, pos: Vec3) -> Entity {
        self.app
            .world_mut()
            .spawn((
                Collidable,
                Transform::from_translation(pos),
                GlobalTransform::from_translation(pos),
            ))
            .id()
    }

    /// Spawn a conductor entity, optionally named.
    pub fn spawn_conductor(&mut self, name: Option<&str>) -> Entity {
        let world = self.app.world_mut();
        match name {
            Some(name) => world.spawn((Conductor, Name::new(name.to_string()))).id(),
            None => world.spawn(Conductor).id(),
        }
    }

    /// Spawn an orchestra wired to the given conductor selector.
    pub fn spawn_orchestra(&mut self, selector: &str) -> Entity {
        self.app.world_mut().spawn(Orchestra::new(selector)).id()
    }

    // -----------------------------------------------------------------------
    // Driving the stage
    // -----------------------------------------------------------------------

    /// Advance one frame per call.
    pub fn tick(&mut self, frames: usize) -> &mut Self {
        for _ in 0..frames {
            self.app.update();
        }
        self
    }

    /// Run frames until the scene reaches `Ready` (readiness is declared
    /// one frame, the transition is taken the next). Panics if the scene
    /// never becomes ready.
    pub fn settle(&mut self) -> &mut Self {
        for _ in 0..4 {
            self.app.update();
            if self.scene_state() == SceneState::Ready {
                return self;
            }
        }
        panic!("scene did not reach SceneState::Ready");
    }

    /// Teleport an entity, updating both local and global transforms so the
    /// next frame's evaluation sees the new position.
    pub fn move_to(&mut self, entity: Entity, pos: Vec3) -> &mut Self {
        let world = self.app.world_mut();
        if let Some(mut transform) = world.get_mut::<Transform>(entity) {
            transform.translation = pos;
        }
        if let Some(mut global) = world.get_mut::<GlobalTransform>(entity) {
            *global = GlobalTransform::from_translation(pos);
        }
        self
    }

    /// Send a `ConductEvent` from the given source entity.
    pub fn send_conduct(&mut self, source: Entity) -> &mut Self {
        self.app.world_mut().send_event(ConductEvent { source });
        self
    }

    // -----------------------------------------------------------------------
    // Assertion helpers
    // -----------------------------------------------------------------------

    pub fn scene_state(&self) -> SceneState {
        *self.app.world().resource::<State<SceneState>>().get()
    }

    /// Take (and clear) the captured collide events.
    pub fn take_collides(&mut self) -> Vec<CollideEvent> {
        std::mem::take(&mut self.app.world_mut().resource_mut::<CollideLog>().0)
    }

    /// Take (and clear) the captured play events.
    pub fn take_plays(&mut self) -> Vec<PlayEvent> {
        std::mem::take(&mut self.app.world_mut().resource_mut::<PlayLog>().0)
    }

    /// Snapshot of a tracker's overlap state.
    pub fn overlap_state(&self, entity: Entity) -> HashSet<Entity> {
        self.app
            .world()
            .get::<OverlapTracker>(entity)
            .map(|tracker| tracker.overlapping.clone())
            .unwrap_or_default()
    }

    /// Snapshot of a tracker's candidate set.
    pub fn candidates(&self, entity: Entity) -> Vec<Entity> {
        self.app
            .world()
            .get::<OverlapTracker>(entity)
            .map(|tracker| tracker.candidates.clone())
            .unwrap_or_default()
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
