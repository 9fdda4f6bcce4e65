//! Scene authority: primitive spawning
//!
//! The only place real scene objects and ghost previews are created.
//! Spawns complete synchronously within the requesting tick.

use bevy::prelude::*;

use crate::core::settings::ToolkitSettings;
use crate::scene::{
    GhostPreview, PrimitiveShape, SceneCategory, SceneCollider, PLANE_BASE_EDGE,
};
use crate::theme::PLACED_OBJECT_COLOR;

/// Optional container every placed object is parented under.
#[derive(Resource, Default)]
pub struct PlacementContainer(pub Option<Entity>);

pub fn mesh_for_shape(shape: PrimitiveShape) -> Mesh {
    match shape {
        PrimitiveShape::Cube => Mesh::from(Cuboid::new(1.0, 1.0, 1.0)),
        PrimitiveShape::Sphere => Mesh::from(Sphere::new(0.5)),
        PrimitiveShape::Cylinder => Mesh::from(Cylinder::new(0.5, 2.0)),
        PrimitiveShape::Plane => Plane3d::default()
            .mesh()
            .size(PLANE_BASE_EDGE, PLANE_BASE_EDGE)
            .build(),
        // radius 0.5 plus a length-1 middle section: total height 2
        PrimitiveShape::Capsule => Mesh::from(Capsule3d::new(0.5, 1.0)),
    }
}

/// Initial local scale for a freshly spawned shape. Planes scale their
/// base edge of 10 down to the configured target edge length; everything
/// else uses the uniform default size.
pub fn initial_scale(shape: PrimitiveShape, settings: &ToolkitSettings) -> Vec3 {
    if shape == PrimitiveShape::Plane {
        let s = (settings.plane_edge_length / PLANE_BASE_EDGE).max(0.01);
        Vec3::new(s, 1.0, s)
    } else {
        Vec3::splat(settings.default_size)
    }
}

/// Spawn a real, colliding scene object of the given shape.
pub fn spawn_primitive(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    shape: PrimitiveShape,
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    parent: Option<Entity>,
) -> Entity {
    let entity = commands
        .spawn((
            Mesh3d(meshes.add(mesh_for_shape(shape))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: PLACED_OBJECT_COLOR,
                ..default()
            })),
            Transform {
                translation: position,
                rotation,
                scale,
            },
            SceneCategory::Placeable,
            SceneCollider::for_shape(shape),
        ))
        .id();
    if let Some(parent) = parent {
        commands.entity(parent).add_child(entity);
    }
    entity
}

/// Spawn the non-colliding placement preview. It has no collider and no
/// category, so it never occludes scene ray casts; the feedback layer
/// paints it with the shared translucent material once it exists.
pub fn spawn_ghost(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    shape: PrimitiveShape,
    scale: Vec3,
) -> Entity {
    commands
        .spawn((
            GhostPreview,
            Mesh3d(meshes.add(mesh_for_shape(shape))),
            MeshMaterial3d(Handle::<StandardMaterial>::default()),
            Transform::from_scale(scale),
            Visibility::Hidden,
        ))
        .id()
}
