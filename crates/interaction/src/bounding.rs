//! Bounding sphere derivation from mesh geometry.
//!
//! Radii are derived once at scene-ready and cached per entity in a
//! [`BoundingRadius`] component: geometries are static in local space, so
//! the per-frame overlap pass never touches vertex data.

use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;

use crate::error::InteractionError;
use crate::overlap::{Collidable, OverlapTracker};

/// Cached bounding-sphere radius for one entity's mesh, in local units.
///
/// The overlap test centers the sphere on the entity's world translation;
/// the mesh-local offset of the bounding-box center is ignored.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BoundingRadius(pub f32);

/// Derive a bounding-sphere radius from mesh vertex positions: the maximum
/// distance from the vertex bounding-box center to any vertex.
///
/// Returns `None` when the mesh has no `Float32x3` position attribute or no
/// vertices. A single-vertex mesh yields radius 0, which is a valid
/// degenerate sphere.
pub fn mesh_bounding_radius(mesh: &Mesh) -> Option<f32> {
    let positions = match mesh.attribute(Mesh::ATTRIBUTE_POSITION)? {
        VertexAttributeValues::Float32x3(positions) => positions,
        _ => return None,
    };
    if positions.is_empty() {
        return None;
    }

    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for p in positions {
        let v = Vec3::from_array(*p);
        min = min.min(v);
        max = max.max(v);
    }
    let center = (min + max) * 0.5;

    let mut radius_sq = 0.0_f32;
    for p in positions {
        radius_sq = radius_sq.max(center.distance_squared(Vec3::from_array(*p)));
    }
    Some(radius_sq.sqrt())
}

/// Builds the [`BoundingRadius`] cache for every entity that participates
/// in overlap tracking. Runs once, at `OnEnter(SceneState::Ready)`.
///
/// Entities without usable geometry are surfaced here as a
/// scene-construction defect and never receive a radius; every overlap test
/// against them is skipped.
pub fn cache_bounding_radii(
    mut commands: Commands,
    meshes: Res<Assets<Mesh>>,
    participants: Query<
        (Entity, Option<&Mesh3d>),
        Or<(With<Collidable>, With<OverlapTracker>)>,
    >,
) {
    for (entity, mesh3d) in &participants {
        let radius = mesh3d
            .and_then(|m| meshes.get(&m.0))
            .and_then(mesh_bounding_radius);
        match radius {
            Some(r) => {
                commands.entity(entity).insert(BoundingRadius(r));
            }
            None => warn!("{}", InteractionError::MissingGeometry(entity)),
        }
    }
}
