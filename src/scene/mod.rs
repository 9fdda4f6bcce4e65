//! Scene object model
//!
//! Scene objects are plain entities carrying a transform, renderable
//! surfaces, a category tag, and an analytic collider used for ray
//! picking. No tool owns them; the selection holds a weak (lookup-only)
//! entity id and never destroys anything through it.

pub mod align;
pub mod query;
pub mod spawn;

use bevy::prelude::*;
use std::ops::BitOr;

pub use align::{bottom_aligned, snap_xz, stack_top};
pub use query::{SceneHit, SceneRaycaster};
pub use spawn::{spawn_ghost, spawn_primitive, PlacementContainer};

/// Disjoint category tags partitioning the scene for ray filtering.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneCategory {
    Ground,
    Selectable,
    Placeable,
    Other,
}

impl SceneCategory {
    const fn bit(self) -> u8 {
        match self {
            SceneCategory::Ground => 1 << 0,
            SceneCategory::Selectable => 1 << 1,
            SceneCategory::Placeable => 1 << 2,
            SceneCategory::Other => 1 << 3,
        }
    }
}

/// A set of scene categories, used to filter ray casts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryMask(u8);

impl CategoryMask {
    pub const NONE: Self = Self(0);
    pub const GROUND: Self = Self(SceneCategory::Ground.bit());
    pub const SELECTABLE: Self = Self(SceneCategory::Selectable.bit());
    pub const PLACEABLE: Self = Self(SceneCategory::Placeable.bit());
    pub const OTHER: Self = Self(SceneCategory::Other.bit());
    pub const ALL: Self = Self(0b1111);

    pub fn contains(self, category: SceneCategory) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CategoryMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The closed set of placeable primitive kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveShape {
    Cube,
    Sphere,
    Cylinder,
    Plane,
    Capsule,
}

impl PrimitiveShape {
    pub const ALL: [PrimitiveShape; 5] = [
        PrimitiveShape::Cube,
        PrimitiveShape::Sphere,
        PrimitiveShape::Cylinder,
        PrimitiveShape::Plane,
        PrimitiveShape::Capsule,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            PrimitiveShape::Cube => "Cube",
            PrimitiveShape::Sphere => "Sphere",
            PrimitiveShape::Cylinder => "Cylinder",
            PrimitiveShape::Plane => "Plane",
            PrimitiveShape::Capsule => "Capsule",
        }
    }

    /// Local-space (unscaled) half extents of the shape's mesh.
    ///
    /// Conventions: unit cube and sphere, height-2 cylinder and capsule,
    /// and a 10x10 plane with near-zero thickness (the plane's world edge
    /// length is controlled by scaling against this base of 10).
    pub fn local_half_extents(self) -> Vec3 {
        match self {
            PrimitiveShape::Cube => Vec3::splat(0.5),
            PrimitiveShape::Sphere => Vec3::splat(0.5),
            PrimitiveShape::Cylinder => Vec3::new(0.5, 1.0, 0.5),
            PrimitiveShape::Capsule => Vec3::new(0.5, 1.0, 0.5),
            PrimitiveShape::Plane => Vec3::new(5.0, 0.0, 5.0),
        }
    }
}

/// Base edge length of the plane mesh; target edge length divides this.
pub const PLANE_BASE_EDGE: f32 = 10.0;

/// Analytic collider for ray picking, in local space.
#[derive(Component, Clone, Copy, Debug)]
pub enum SceneCollider {
    Cuboid { half_extents: Vec3 },
    Sphere { radius: f32 },
}

impl SceneCollider {
    pub fn for_shape(shape: PrimitiveShape) -> Self {
        match shape {
            PrimitiveShape::Sphere => SceneCollider::Sphere { radius: 0.5 },
            // Cylinder, capsule and plane pick against their bounding box;
            // the alignment math only consumes bounding extents anyway.
            other => SceneCollider::Cuboid {
                half_extents: other.local_half_extents().max(Vec3::splat(1e-4)),
            },
        }
    }

    pub fn local_half_extents(self) -> Vec3 {
        match self {
            SceneCollider::Cuboid { half_extents } => half_extents,
            SceneCollider::Sphere { radius } => Vec3::splat(radius),
        }
    }
}

/// A surface belonging to a sub-part resolves hits to its rigid-body owner.
#[derive(Component, Clone, Copy, Debug)]
pub struct PartOwner(pub Entity);

/// Marker for the non-colliding placement preview.
#[derive(Component, Clone, Copy, Debug)]
pub struct GhostPreview;

/// World-axis-aligned bounding box of a collider under a transform,
/// as the AABB of its eight transformed corners.
pub fn world_aabb(transform: &GlobalTransform, collider: &SceneCollider) -> (Vec3, Vec3) {
    let h = collider.local_half_extents();
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for ix in [-1.0, 1.0] {
        for iy in [-1.0, 1.0] {
            for iz in [-1.0, 1.0] {
                let corner = transform.transform_point(h * Vec3::new(ix, iy, iz));
                min = min.min(corner);
                max = max.max(corner);
            }
        }
    }
    (min, max)
}
