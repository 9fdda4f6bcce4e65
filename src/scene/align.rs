//! Placement alignment math
//!
//! Pure functions shared by the placement and transform tools: grid
//! snapping on the horizontal axes, bottom alignment against a ground
//! hit, and top alignment when stacking on an existing object.

use bevy::prelude::*;

use crate::scene::PrimitiveShape;

/// Snap the horizontal components of `v` to the nearest multiple of `step`.
/// The vertical component is never snapped. Identity for step <= 0.
pub fn snap_xz(v: Vec3, step: f32) -> Vec3 {
    if step <= 0.0 {
        return v;
    }
    Vec3::new(
        (v.x / step).round() * step,
        v.y,
        (v.z / step).round() * step,
    )
}

/// Effective half height of a preview along the surface normal axis:
/// local bounding extent scaled by world scale, with the minimum
/// half-thickness floor for planes.
pub fn half_height(shape: PrimitiveShape, world_scale: Vec3, plane_min_half: f32) -> f32 {
    let mut h = (shape.local_half_extents().y * world_scale.y).abs();
    if shape == PrimitiveShape::Plane {
        h = h.max(plane_min_half);
    }
    h
}

/// Bottom alignment: rest the object's lower bound on the ground hit,
/// offset along the hit normal by its half height plus a hover lift
/// (planes receive an extra anti-z-fight lift).
pub fn bottom_aligned(
    hit_point: Vec3,
    hit_normal: Vec3,
    shape: PrimitiveShape,
    world_scale: Vec3,
    hover: f32,
    plane_lift: f32,
    plane_min_half: f32,
) -> Vec3 {
    let mut lift = hover;
    if shape == PrimitiveShape::Plane {
        lift += plane_lift;
    }
    let h = half_height(shape, world_scale, plane_min_half);
    hit_point + hit_normal * (h + lift)
}

/// Top alignment: stack the object on the hit object's upper bound,
/// never placing lower than the raw hit point's height.
pub fn stack_top(
    hit_point: Vec3,
    target_top_y: f32,
    shape: PrimitiveShape,
    world_scale: Vec3,
    hover: f32,
    plane_lift: f32,
    plane_min_half: f32,
) -> Vec3 {
    let mut lift = hover;
    if shape == PrimitiveShape::Plane {
        lift += plane_lift;
    }
    let h = half_height(shape, world_scale, plane_min_half);
    let mut p = hit_point;
    p.y = (target_top_y + h + lift).max(hit_point.y);
    p
}
