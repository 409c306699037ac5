use std::collections::HashSet;

use bevy::prelude::*;

// =============================================================================
// Components
// =============================================================================

/// Marker tag: this entity participates in overlap tracking as a candidate.
#[derive(Component, Debug, Default)]
pub struct Collidable;

/// One overlap-tracking subsystem instance, attached to the tracked entity.
///
/// Owns the candidate set and the overlap state for its entity. Both are
/// mutated only by this crate's systems: the candidate set once at
/// scene-ready, the overlap state inside the per-frame evaluation step.
#[derive(Component, Debug, Default)]
pub struct OverlapTracker {
    /// Candidates tested every frame, in stable entity-id order. Computed
    /// once at scene-ready; entities added to the scene later are not
    /// picked up (a known limitation of the one-shot registry).
    pub candidates: Vec<Entity>,
    /// Candidates whose most recent overlap test returned true. An entity
    /// is present here if and only if no negative test has been observed
    /// since its last enter transition.
    pub overlapping: HashSet<Entity>,
    /// Scratch membership set for the current frame, reused to keep the
    /// evaluation pass allocation-free in steady state.
    pub(crate) current: HashSet<Entity>,
}

impl OverlapTracker {
    /// Whether `candidate` is currently considered overlapping.
    pub fn is_overlapping(&self, candidate: Entity) -> bool {
        self.overlapping.contains(&candidate)
    }
}

// =============================================================================
// Events
// =============================================================================

/// Sent once per apart-to-overlapping transition. There is no counterpart
/// event for the overlapping-to-apart transition; exits only update the
/// tracker's internal state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollideEvent {
    /// The entity whose tracker observed the transition.
    pub tracked: Entity,
    /// The candidate that just began overlapping the tracked entity.
    pub candidate: Entity,
}
