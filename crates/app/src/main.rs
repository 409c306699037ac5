use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use interaction::bounding::BoundingRadius;
use interaction::orchestra::{forward_conduct, Conductor, ConductEvent, Orchestra, PlayEvent};
use interaction::overlap::{evaluate_overlaps, Collidable, CollideEvent, OverlapTracker};
use interaction::{InteractionPlugin, StageSettings};

/// Instruments drift inside this radius; the probe orbits through it.
const STAGE_RADIUS: f32 = 6.0;

/// Seconds between conductor cues.
const CUE_INTERVAL: f32 = 4.0;

const INSTRUMENT_NAMES: [&str; 8] = [
    "violin", "viola", "cello", "bass", "flute", "oboe", "horn", "timpani",
];

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Overture".to_string(),
                resolution: (1280.0, 720.0).into(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
            unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
        })
        .insert_resource(StageSettings::load_or_default("overture.json"))
        .init_resource::<StageRng>()
        .init_resource::<ConductorBaton>()
        .init_resource::<DebugOverlay>()
        .add_plugins(InteractionPlugin)
        .add_systems(Startup, setup_stage)
        .add_systems(
            Update,
            (
                orbit_probe,
                drift_instruments,
                cue_conductor.before(forward_conduct),
                log_collisions.after(evaluate_overlaps),
                log_plays.after(forward_conduct),
                toggle_overlay,
                draw_bounding_spheres,
            ),
        )
        .run();
}

// ---------------------------------------------------------------------------
// Resources and components
// ---------------------------------------------------------------------------

/// Deterministic RNG for stage layout, so every launch places the same
/// scene.
#[derive(Resource)]
struct StageRng(ChaCha8Rng);

impl Default for StageRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(42))
    }
}

/// Repeating timer driving the conductor's cue.
#[derive(Resource)]
struct ConductorBaton(Timer);

impl Default for ConductorBaton {
    fn default() -> Self {
        Self(Timer::from_seconds(CUE_INTERVAL, TimerMode::Repeating))
    }
}

/// Toggled with B: draws every bounding sphere as a gizmo.
#[derive(Resource, Default)]
struct DebugOverlay(bool);

/// The probe circles the stage center at a fixed height.
#[derive(Component)]
struct Orbiting {
    radius: f32,
    angular_speed: f32,
}

/// Slow wandering applied to instruments, reflected at the stage edge.
#[derive(Component)]
struct Drift {
    velocity: Vec3,
}

// ---------------------------------------------------------------------------
// Stage setup
// ---------------------------------------------------------------------------

fn setup_stage(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<StageRng>,
    settings: Res<StageSettings>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 12.0, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let floor_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.25, 0.22, 0.2),
        perceptual_roughness: 0.95,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(30.0, 30.0))),
        MeshMaterial3d(floor_mat),
    ));

    // Conductor podium. Named after the configured selector so the relay
    // resolves it either way (name match or tag fallback).
    let conductor_name = if settings.conductor_selector.is_empty() {
        "maestro".to_string()
    } else {
        settings.conductor_selector.clone()
    };
    commands.spawn((
        Conductor,
        Name::new(conductor_name),
        Mesh3d(meshes.add(Cuboid::new(0.8, 1.6, 0.8))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.1, 0.1, 0.12),
            ..default()
        })),
        Transform::from_xyz(0.0, 0.8, -STAGE_RADIUS - 2.0),
    ));

    commands.spawn((
        Orchestra::new(settings.conductor_selector.clone()),
        Name::new("orchestra"),
    ));

    // The tracked probe.
    commands.spawn((
        OverlapTracker::default(),
        Name::new("probe"),
        Mesh3d(meshes.add(Sphere::new(0.6))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.55, 0.1),
            perceptual_roughness: 0.3,
            ..default()
        })),
        Transform::from_xyz(4.0, 1.0, 0.0),
        Orbiting {
            radius: 4.0,
            angular_speed: 0.4,
        },
    ));

    // Ring of collidable instruments with deterministic placement jitter.
    let instrument_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.35, 0.18),
        perceptual_roughness: 0.7,
        ..default()
    });
    let count = INSTRUMENT_NAMES.len();
    for (i, name) in INSTRUMENT_NAMES.iter().enumerate() {
        let angle = i as f32 / count as f32 * std::f32::consts::TAU;
        let ring = 4.0 + rng.0.gen_range(-0.5..0.5);
        let radius = rng.0.gen_range(0.4..0.9);
        let drift_angle = rng.0.gen_range(0.0..std::f32::consts::TAU);
        commands.spawn((
            Collidable,
            Name::new(*name),
            Mesh3d(meshes.add(Sphere::new(radius))),
            MeshMaterial3d(instrument_mat.clone()),
            Transform::from_xyz(angle.cos() * ring, 1.0, angle.sin() * ring),
            Drift {
                velocity: Vec3::new(drift_angle.cos(), 0.0, drift_angle.sin()) * 0.3,
            },
        ));
    }
}

// ---------------------------------------------------------------------------
// Stage motion
// ---------------------------------------------------------------------------

fn orbit_probe(time: Res<Time>, mut probes: Query<(&mut Transform, &Orbiting)>) {
    let t = time.elapsed_secs();
    for (mut transform, orbit) in &mut probes {
        let angle = t * orbit.angular_speed;
        transform.translation =
            Vec3::new(angle.cos() * orbit.radius, 1.0, angle.sin() * orbit.radius);
    }
}

fn drift_instruments(time: Res<Time>, mut instruments: Query<(&mut Transform, &mut Drift)>) {
    let dt = time.delta_secs();
    for (mut transform, mut drift) in &mut instruments {
        transform.translation += drift.velocity * dt;
        let planar = Vec2::new(transform.translation.x, transform.translation.z);
        if planar.length() > STAGE_RADIUS {
            drift.velocity = -drift.velocity;
        }
    }
}

// ---------------------------------------------------------------------------
// Conductor cue and event logging
// ---------------------------------------------------------------------------

fn cue_conductor(
    time: Res<Time>,
    mut baton: ResMut<ConductorBaton>,
    conductors: Query<Entity, With<Conductor>>,
    mut cues: EventWriter<ConductEvent>,
) {
    if !baton.0.tick(time.delta()).just_finished() {
        return;
    }
    for source in &conductors {
        cues.send(ConductEvent { source });
    }
}

fn log_collisions(mut events: EventReader<CollideEvent>, names: Query<&Name>) {
    for event in events.read() {
        match names.get(event.candidate) {
            Ok(name) => info!("probe touched {name}"),
            Err(_) => info!("probe touched {}", event.candidate),
        }
    }
}

fn log_plays(mut events: EventReader<PlayEvent>, names: Query<&Name>) {
    for event in events.read() {
        match names.get(event.orchestra) {
            Ok(name) => info!("{name} plays"),
            Err(_) => info!("{} plays", event.orchestra),
        }
    }
}

// ---------------------------------------------------------------------------
// Debug overlay
// ---------------------------------------------------------------------------

fn toggle_overlay(keys: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<DebugOverlay>) {
    if keys.just_pressed(KeyCode::KeyB) {
        overlay.0 = !overlay.0;
    }
}

fn draw_bounding_spheres(
    overlay: Res<DebugOverlay>,
    mut gizmos: Gizmos,
    trackers: Query<&OverlapTracker>,
    spheres: Query<(Entity, &GlobalTransform, &BoundingRadius)>,
) {
    if !overlay.0 {
        return;
    }
    for (entity, transform, radius) in &spheres {
        let overlapping = trackers.iter().any(|tracker| tracker.is_overlapping(entity));
        let color = if overlapping {
            Color::srgb(0.2, 0.9, 0.3)
        } else {
            Color::srgb(0.6, 0.6, 0.6)
        };
        gizmos.sphere(transform.translation(), radius.0, color);
    }
}
