//! Guide ray visual
//!
//! A cosmetic line from the pointer origin toward the first scene hit
//! of any category, or the full configured length on a miss. It never
//! participates in hit-testing.

use bevy::prelude::*;

use crate::core::settings::ToolkitSettings;
use crate::pointer::PointerState;
use crate::scene::{CategoryMask, SceneRaycaster};
use crate::theme::{RAY_END_COLOR, RAY_START_COLOR};

/// Whether the guide ray is currently shown. Tools flip this on mode
/// entry/exit and optionally after a completed pick.
#[derive(Resource, Default)]
pub struct GuideRayVisual(pub bool);

pub fn draw_guide_ray(
    visual: Res<GuideRayVisual>,
    pointer: Res<PointerState>,
    raycaster: SceneRaycaster,
    settings: Res<ToolkitSettings>,
    mut gizmos: Gizmos,
) {
    if !visual.0 {
        return;
    }
    let Some(ray) = pointer.ray else { return };

    let max_length = settings.ray_visual_max_length;
    let end = match raycaster.cast(ray, max_length, CategoryMask::ALL) {
        Some(hit) => hit.point,
        None => ray.get_point(max_length),
    };
    gizmos.line_gradient(ray.origin, end, RAY_START_COLOR, RAY_END_COLOR);
}
