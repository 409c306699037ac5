use bevy::prelude::*;

use crate::bounding::BoundingRadius;

use super::types::{Collidable, CollideEvent, OverlapTracker};

// =============================================================================
// Evaluator
// =============================================================================

/// Bounding-sphere overlap test. Tangent spheres (distance exactly equal to
/// the radius sum) do NOT overlap; the boundary is exclusive.
pub fn spheres_overlap(a_pos: Vec3, a_radius: f32, b_pos: Vec3, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

// =============================================================================
// Candidate registry
// =============================================================================

/// Populates each tracker's candidate set from the scene. Runs once, at
/// `OnEnter(SceneState::Ready)`, when every tagged entity exists.
///
/// The tracked entity is excluded from its own candidate set even when it
/// carries the `Collidable` tag itself. Candidates are sorted by entity id
/// so the per-frame evaluation order is deterministic. Idempotent: a
/// tracker whose set is already populated is left untouched.
pub fn init_candidates(
    mut trackers: Query<(Entity, &mut OverlapTracker)>,
    collidables: Query<Entity, With<Collidable>>,
) {
    for (tracked, mut tracker) in &mut trackers {
        if !tracker.candidates.is_empty() {
            continue;
        }
        let mut candidates: Vec<Entity> =
            collidables.iter().filter(|&e| e != tracked).collect();
        candidates.sort();
        info!(
            "overlap tracker {tracked}: registered {} candidate(s)",
            candidates.len()
        );
        tracker.candidates = candidates;
    }
}

// =============================================================================
// Transition tracker
// =============================================================================

/// Per-frame evaluation step. For each tracker: compute the full overlap
/// membership for this frame, then diff it against the recorded overlap
/// state. An apart-to-overlapping change sends a [`CollideEvent`] and adds
/// the candidate to the state; the reverse change removes it silently.
///
/// Pairs involving an entity with no cached [`BoundingRadius`] are skipped;
/// the missing geometry was already surfaced when the cache was built. An
/// empty candidate set makes this a no-op frame.
pub fn evaluate_overlaps(
    mut trackers: Query<(Entity, &mut OverlapTracker)>,
    geometry: Query<(&GlobalTransform, &BoundingRadius)>,
    mut collisions: EventWriter<CollideEvent>,
) {
    for (tracked, mut tracker) in &mut trackers {
        let Ok((tracked_tf, tracked_radius)) = geometry.get(tracked) else {
            continue;
        };
        let tracked_pos = tracked_tf.translation();
        let tracker = &mut *tracker;

        // Full membership pass first, into the reusable scratch set, so the
        // diff below never depends on candidate evaluation order.
        tracker.current.clear();
        for &candidate in &tracker.candidates {
            let Ok((candidate_tf, candidate_radius)) = geometry.get(candidate) else {
                continue;
            };
            if spheres_overlap(
                tracked_pos,
                tracked_radius.0,
                candidate_tf.translation(),
                candidate_radius.0,
            ) {
                tracker.current.insert(candidate);
            }
        }

        // Diff against the previous overlap state, in candidate order.
        for &candidate in &tracker.candidates {
            if tracker.current.contains(&candidate) {
                if tracker.overlapping.insert(candidate) {
                    collisions.send(CollideEvent { tracked, candidate });
                }
            } else {
                tracker.overlapping.remove(&candidate);
            }
        }
    }
}
