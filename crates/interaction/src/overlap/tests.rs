#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::overlap::{Collidable, OverlapTracker};
    use crate::test_harness::TestStage;

    use super::super::systems::spheres_overlap;

    // -----------------------------------------------------------------------
    // Evaluator
    // -----------------------------------------------------------------------

    #[test]
    fn test_overlap_inside_sum_of_radii() {
        assert!(spheres_overlap(
            Vec3::ZERO,
            1.0,
            Vec3::new(1.5, 0.0, 0.0),
            1.0
        ));
    }

    #[test]
    fn test_no_overlap_beyond_sum_of_radii() {
        assert!(!spheres_overlap(
            Vec3::ZERO,
            1.0,
            Vec3::new(5.0, 0.0, 0.0),
            1.0
        ));
    }

    #[test]
    fn test_symmetry() {
        let a = Vec3::new(0.5, -2.0, 3.0);
        let b = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(spheres_overlap(a, 1.5, b, 0.75), spheres_overlap(b, 0.75, a, 1.5));
    }

    #[test]
    fn test_tangent_spheres_do_not_overlap() {
        // Distance exactly equal to the radius sum: exclusive boundary.
        assert!(!spheres_overlap(
            Vec3::ZERO,
            1.0,
            Vec3::new(2.0, 0.0, 0.0),
            1.0
        ));
    }

    #[test]
    fn test_zero_radius_degenerates_to_point_test() {
        let point = Vec3::new(0.5, 0.0, 0.0);
        assert!(spheres_overlap(Vec3::ZERO, 1.0, point, 0.0));
        assert!(!spheres_overlap(Vec3::ZERO, 1.0, Vec3::new(1.5, 0.0, 0.0), 0.0));
    }

    #[test]
    fn test_overlap_uses_all_three_axes() {
        // 3-4-0 triangle: distance 5, radii sum 4.9, apart.
        assert!(!spheres_overlap(
            Vec3::ZERO,
            2.4,
            Vec3::new(3.0, 4.0, 0.0),
            2.5
        ));
        // Radii sum 5.1, overlapping.
        assert!(spheres_overlap(
            Vec3::ZERO,
            2.6,
            Vec3::new(3.0, 4.0, 0.0),
            2.5
        ));
    }

    // -----------------------------------------------------------------------
    // Candidate registry
    // -----------------------------------------------------------------------

    #[test]
    fn test_candidates_exclude_self() {
        let mut stage = TestStage::new();
        let probe = stage.spawn_probe(Vec3::ZERO, 1.0);
        // The probe is itself tagged collidable; it must not self-register.
        stage.world_mut().entity_mut(probe).insert(Collidable);
        let a = stage.spawn_instrument(Vec3::new(10.0, 0.0, 0.0), 1.0);
        let b = stage.spawn_instrument(Vec3::new(20.0, 0.0, 0.0), 1.0);
        stage.settle();

        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(stage.candidates(probe), expected);
    }

    #[test]
    fn test_candidates_are_ordered_by_entity_id() {
        let mut stage = TestStage::new();
        let probe = stage.spawn_probe(Vec3::ZERO, 1.0);
        let mut spawned: Vec<Entity> = (0..5)
            .map(|i| stage.spawn_instrument(Vec3::new(10.0 + i as f32, 0.0, 0.0), 0.5))
            .collect();
        stage.settle();

        spawned.sort();
        assert_eq!(stage.candidates(probe), spawned);
    }

    #[test]
    fn test_registry_ignores_late_spawns() {
        // The candidate set is computed once at scene-ready and does not
        // react to entities added later.
        let mut stage = TestStage::new();
        let probe = stage.spawn_probe(Vec3::ZERO, 1.0);
        let early = stage.spawn_instrument(Vec3::new(10.0, 0.0, 0.0), 1.0);
        stage.settle();

        stage.spawn_instrument(Vec3::new(0.5, 0.0, 0.0), 1.0);
        stage.tick(3);
        assert_eq!(stage.candidates(probe), vec![early]);
        assert!(stage.take_collides().is_empty());
    }

    // -----------------------------------------------------------------------
    // Transition tracker
    // -----------------------------------------------------------------------

    #[test]
    fn test_no_event_while_apart() {
        let mut stage = TestStage::new();
        let probe = stage.spawn_probe(Vec3::ZERO, 1.0);
        stage.spawn_instrument(Vec3::new(5.0, 0.0, 0.0), 1.0);
        stage.settle().tick(5);

        assert!(stage.take_collides().is_empty());
        assert!(stage.overlap_state(probe).is_empty());
    }

    #[test]
    fn test_enter_fires_exactly_once() {
        let mut stage = TestStage::new();
        let probe = stage.spawn_probe(Vec3::ZERO, 1.0);
        let instrument = stage.spawn_instrument(Vec3::new(1.5, 0.0, 0.0), 1.0);
        stage.settle().tick(10);

        let events = stage.take_collides();
        assert_eq!(events.len(), 1, "one enter transition, one event");
        assert_eq!(events[0].tracked, probe);
        assert_eq!(events[0].candidate, instrument);
        assert!(stage.overlap_state(probe).contains(&instrument));
    }

    #[test]
    fn test_exit_updates_state_without_event() {
        let mut stage = TestStage::new();
        let probe = stage.spawn_probe(Vec3::ZERO, 1.0);
        let instrument = stage.spawn_instrument(Vec3::new(1.5, 0.0, 0.0), 1.0);
        stage.settle().tick(1);
        stage.take_collides();

        stage.move_to(instrument, Vec3::new(10.0, 0.0, 0.0)).tick(3);
        assert!(stage.overlap_state(probe).is_empty());
        assert!(stage.take_collides().is_empty());
    }

    #[test]
    fn test_meshless_candidate_is_skipped() {
        let mut stage = TestStage::new();
        let probe = stage.spawn_probe(Vec3::ZERO, 1.0);
        let ghost = stage.spawn_meshless_collidable(Vec3::new(0.1, 0.0, 0.0));
        let real = stage.spawn_instrument(Vec3::new(1.0, 0.0, 0.0), 1.0);
        stage.settle().tick(3);

        // The meshless entity sits inside the probe but never registers as
        // overlapping; the rest of the candidate set keeps working.
        let events = stage.take_collides();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].candidate, real);
        assert!(!stage.overlap_state(probe).contains(&ghost));
    }

    #[test]
    fn test_two_trackers_are_independent() {
        let mut stage = TestStage::new();
        let near = stage.spawn_probe(Vec3::ZERO, 1.0);
        let far = stage.spawn_probe(Vec3::new(100.0, 0.0, 0.0), 1.0);
        let instrument = stage.spawn_instrument(Vec3::new(1.0, 0.0, 0.0), 1.0);
        stage.settle().tick(2);

        let near_tracker = stage.world().get::<OverlapTracker>(near).unwrap();
        assert!(near_tracker.is_overlapping(instrument));
        assert!(stage.overlap_state(far).is_empty());
        let events = stage.take_collides();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tracked, near);
    }
}
