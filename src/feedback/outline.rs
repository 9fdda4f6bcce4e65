//! Selection bounding outline
//!
//! A world-axis-aligned bounding box drawn as 12 gizmo edges around the
//! bound target, recomputed every tick so it follows moves, rotations
//! and scales. Unbinds itself when the target is cleared or destroyed.

use bevy::prelude::*;

use crate::scene::{world_aabb, SceneCollider};
use crate::theme::OUTLINE_COLOR;

/// The object currently outlined, if any.
#[derive(Resource, Default)]
pub struct OutlineTarget(pub Option<Entity>);

pub fn draw_selection_outline(
    mut target: ResMut<OutlineTarget>,
    objects: Query<(&GlobalTransform, &SceneCollider)>,
    mut gizmos: Gizmos,
) {
    let Some(entity) = target.0 else { return };
    let Ok((transform, collider)) = objects.get(entity) else {
        target.0 = None;
        return;
    };

    let (min, max) = world_aabb(transform, collider);
    let corners = [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(max.x, max.y, max.z),
        Vec3::new(min.x, max.y, max.z),
    ];
    // bottom loop, top loop, verticals
    const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    for (a, b) in EDGES {
        gizmos.line(corners[a], corners[b], OUTLINE_COLOR);
    }
}
