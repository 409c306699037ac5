//! Conduct-to-play relay.
//!
//! A forwarding entity resolves its conductor once at scene-ready, then
//! re-emits every [`ConductEvent`] from that source as a [`PlayEvent`] on
//! the same frame. One-shot registration, no state machine, no retry: a
//! missing conductor is a setup failure and the relay stays inert.

use bevy::prelude::*;

use crate::error::InteractionError;
use crate::scene_state::SceneState;

/// Marker tag: this entity can act as a conductor.
#[derive(Component, Debug, Default)]
pub struct Conductor;

/// The forwarding component. Attach to the entity that should re-emit the
/// conductor's cue.
#[derive(Component, Debug)]
pub struct Orchestra {
    /// Selector naming the conductor. Non-empty: resolved by `Name` match.
    /// Empty: the first `Conductor`-tagged entity (in entity-id order).
    pub selector: String,
    conductor: Option<Entity>,
}

impl Orchestra {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            conductor: None,
        }
    }

    /// The resolved conductor, if setup succeeded.
    pub fn conductor(&self) -> Option<Entity> {
        self.conductor
    }
}

/// A conductor's cue.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConductEvent {
    pub source: Entity,
}

/// Sent by an orchestra whenever its conductor cues it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayEvent {
    pub orchestra: Entity,
}

/// Resolves each orchestra's conductor. Runs once, at
/// `OnEnter(SceneState::Ready)`; there is no retry because the scene's
/// entity population is fixed by then.
pub fn setup_orchestra(
    mut orchestras: Query<(Entity, &mut Orchestra)>,
    named: Query<(Entity, &Name)>,
    conductors: Query<Entity, With<Conductor>>,
) {
    for (entity, mut orchestra) in &mut orchestras {
        if orchestra.conductor.is_some() {
            continue;
        }
        let found = if orchestra.selector.is_empty() {
            let mut tagged: Vec<Entity> = conductors.iter().collect();
            tagged.sort();
            tagged.first().copied()
        } else {
            named
                .iter()
                .find(|(_, name)| name.as_str() == orchestra.selector)
                .map(|(e, _)| e)
        };
        match found {
            Some(conductor) => {
                info!("orchestra {entity}: listening to conductor {conductor}");
                orchestra.conductor = Some(conductor);
            }
            None => error!(
                "orchestra {entity}: {}",
                InteractionError::ConductorNotFound(orchestra.selector.clone())
            ),
        }
    }
}

/// Forwards `conduct` to `play` with no payload transformation. Cues from
/// entities other than an orchestra's resolved conductor are ignored.
pub fn forward_conduct(
    mut conducts: EventReader<ConductEvent>,
    orchestras: Query<(Entity, &Orchestra)>,
    mut plays: EventWriter<PlayEvent>,
) {
    for conduct in conducts.read() {
        for (entity, orchestra) in &orchestras {
            if orchestra.conductor == Some(conduct.source) {
                plays.send(PlayEvent { orchestra: entity });
            }
        }
    }
}

pub struct OrchestraPlugin;

impl Plugin for OrchestraPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ConductEvent>()
            .add_event::<PlayEvent>()
            .add_systems(OnEnter(SceneState::Ready), setup_orchestra)
            .add_systems(
                Update,
                forward_conduct.run_if(in_state(SceneState::Ready)),
            );
    }
}
