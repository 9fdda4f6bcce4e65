//! Scene ray queries
//!
//! Casts a world-space ray against every analytic collider in the scene
//! and returns the nearest hit, filtered by a category mask. Colliders
//! are intersected in their own local space (slab test for cuboids, the
//! quadratic for spheres) so rotated and non-uniformly scaled objects
//! pick correctly.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::scene::{CategoryMask, PartOwner, SceneCategory, SceneCollider};

/// The nearest intersection returned by a cast.
#[derive(Clone, Copy, Debug)]
pub struct SceneHit {
    /// Resolved object: the part's rigid-body owner if it has one
    pub entity: Entity,
    /// The part actually intersected
    pub part: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
    pub category: SceneCategory,
}

#[derive(SystemParam)]
pub struct SceneRaycaster<'w, 's> {
    colliders: Query<
        'w,
        's,
        (
            Entity,
            &'static GlobalTransform,
            &'static SceneCollider,
            &'static SceneCategory,
        ),
    >,
    owners: Query<'w, 's, &'static PartOwner>,
}

impl SceneRaycaster<'_, '_> {
    /// Nearest hit within `max_distance` whose category is in `mask`.
    pub fn cast(&self, ray: Ray3d, max_distance: f32, mask: CategoryMask) -> Option<SceneHit> {
        let dir: Vec3 = *ray.direction;
        let mut best: Option<SceneHit> = None;

        for (entity, transform, collider, category) in self.colliders.iter() {
            if !mask.contains(*category) {
                continue;
            }

            let inv = transform.affine().inverse();
            let local_origin = inv.transform_point3(ray.origin);
            let local_dir = inv.transform_vector3(dir);

            let local = match collider {
                SceneCollider::Cuboid { half_extents } => {
                    ray_cuboid_intersection(local_origin, local_dir, *half_extents)
                }
                SceneCollider::Sphere { radius } => {
                    ray_sphere_intersection(local_origin, local_dir, *radius)
                        .map(|t| (t, (local_origin + local_dir * t).normalize_or_zero()))
                }
            };

            let Some((t, local_normal)) = local else {
                continue;
            };
            // Same ray parameter in local and world space; the world
            // direction is normalized, so t is the world distance.
            if t > max_distance {
                continue;
            }
            if best.as_ref().is_some_and(|b| b.distance <= t) {
                continue;
            }

            let normal_matrix = transform.affine().matrix3.inverse().transpose();
            let normal = (normal_matrix * local_normal).normalize_or_zero();
            let resolved = self
                .owners
                .get(entity)
                .map(|owner| owner.0)
                .unwrap_or(entity);

            best = Some(SceneHit {
                entity: resolved,
                part: entity,
                point: ray.get_point(t),
                normal,
                distance: t,
                category: *category,
            });
        }

        best
    }
}

/// Slab intersection of a ray with a cuboid of the given half extents,
/// centered at the local origin. Returns the entering parameter and the
/// local surface normal. Rays starting inside do not hit.
pub fn ray_cuboid_intersection(origin: Vec3, dir: Vec3, half: Vec3) -> Option<(f32, Vec3)> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    let mut entry_axis = 0usize;
    let mut entry_sign = 0.0f32;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let h = half[axis];
        if d.abs() < 1e-9 {
            if o.abs() > h {
                return None;
            }
            continue;
        }
        let inv_d = 1.0 / d;
        let mut t0 = (-h - o) * inv_d;
        let mut t1 = (h - o) * inv_d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_min {
            t_min = t0;
            entry_axis = axis;
            // the entering face looks back against the ray on this axis
            entry_sign = -d.signum();
        }
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    if t_min <= 1e-6 {
        // Starting inside (or behind): treat as no hit, matching the
        // front-face-only behavior tools rely on
        return None;
    }

    let mut normal = Vec3::ZERO;
    normal[entry_axis] = entry_sign;
    Some((t_min, normal))
}

/// Entering parameter of a ray against a sphere of `radius` centered at
/// the local origin, via the standard quadratic. Inside starts miss.
pub fn ray_sphere_intersection(origin: Vec3, dir: Vec3, radius: f32) -> Option<f32> {
    let a = dir.dot(dir);
    if a < 1e-12 {
        return None;
    }
    let b = origin.dot(dir);
    let c = origin.dot(origin) - radius * radius;
    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / a;
    if t > 1e-6 {
        Some(t)
    } else {
        None
    }
}
