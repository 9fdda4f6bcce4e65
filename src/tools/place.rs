//! Placement tool
//!
//! A ghost preview follows the pointer ray, bottom-aligned on the
//! ground or stacked on top of existing objects, with grid snapping on
//! the horizontal axes. The stick scales the preview uniformly. Confirm
//! spawns the real object at exactly the preview's pose and leaves the
//! mode; cancel just leaves.

use bevy::prelude::*;

use crate::core::settings::ToolkitSettings;
use crate::pointer::PointerState;
use crate::scene::align::{bottom_aligned, snap_xz, stack_top};
use crate::scene::query::SceneRaycaster;
use crate::scene::spawn::{initial_scale, spawn_ghost, spawn_primitive, PlacementContainer};
use crate::scene::{world_aabb, GhostPreview, PrimitiveShape, SceneCollider};

use super::{ActiveTool, ToolEntered, ToolExited, ToolMode, ToolRequest};

/// Live placement state. `preview` is the ghost entity while the mode
/// is active.
#[derive(Resource, Default, Debug)]
pub struct PlacementState {
    pub shape: Option<PrimitiveShape>,
    pub preview: Option<Entity>,
    pub has_valid_pose: bool,
}

pub fn handle_placement_enter(
    mut entered: EventReader<ToolEntered>,
    mut state: ResMut<PlacementState>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    settings: Res<ToolkitSettings>,
) {
    for event in entered.read() {
        let ToolEntered::Placing(shape) = event else {
            continue;
        };
        // Re-entering with a different shape replaces the ghost.
        if let Some(old) = state.preview.take() {
            if let Ok(mut old) = commands.get_entity(old) {
                old.despawn();
            }
        }
        let scale = initial_scale(*shape, &settings);
        let preview = spawn_ghost(&mut commands, &mut meshes, *shape, scale);
        *state = PlacementState {
            shape: Some(*shape),
            preview: Some(preview),
            has_valid_pose: false,
        };
    }
}

pub fn handle_placement_exit(
    mut exited: EventReader<ToolExited>,
    mut state: ResMut<PlacementState>,
    mut commands: Commands,
) {
    for event in exited.read() {
        if event.0 != ToolMode::Placing {
            continue;
        }
        if let Some(preview) = state.preview.take() {
            if let Ok(mut preview) = commands.get_entity(preview) {
                preview.despawn();
            }
        }
        *state = PlacementState::default();
    }
}

pub fn placement_tick(
    active: Res<ActiveTool>,
    mut state: ResMut<PlacementState>,
    pointer: Res<PointerState>,
    raycaster: SceneRaycaster,
    settings: Res<ToolkitSettings>,
    time: Res<Time>,
    mut previews: Query<(&mut Transform, &mut Visibility), With<GhostPreview>>,
    targets: Query<(&GlobalTransform, &SceneCollider), Without<GhostPreview>>,
    container: Res<PlacementContainer>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut requests: EventWriter<ToolRequest>,
) {
    if active.0 != ToolMode::Placing {
        return;
    }
    let (Some(shape), Some(preview)) = (state.shape, state.preview) else {
        return;
    };
    let Ok((mut transform, mut visibility)) = previews.get_mut(preview) else {
        return;
    };

    // One cast against ground and stackable objects; the hit category
    // decides bottom alignment vs stacking.
    let mut has_pose = false;
    if let Some(ray) = pointer.current_ray() {
        if let Some(hit) =
            raycaster.cast(ray, settings.placement_ray_distance, settings.placement_mask)
        {
            let mut pos = if settings.ground_mask.contains(hit.category) {
                bottom_aligned(
                    hit.point,
                    hit.normal,
                    shape,
                    transform.scale,
                    settings.hover_offset,
                    settings.plane_lift,
                    settings.plane_min_half_thickness,
                )
            } else {
                let target_top = targets
                    .get(hit.part)
                    .map(|(t, c)| world_aabb(t, c).1.y)
                    .unwrap_or(hit.point.y);
                stack_top(
                    hit.point,
                    target_top,
                    shape,
                    transform.scale,
                    settings.hover_offset,
                    settings.plane_lift,
                    settings.plane_min_half_thickness,
                )
            };
            if settings.snap_to_grid {
                pos = snap_xz(pos, settings.grid_size);
            }
            transform.translation = pos;
            has_pose = true;
        }
    }
    *visibility = if has_pose {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    state.has_valid_pose = has_pose;

    if has_pose && pointer.confirm_pressed_this_tick() {
        spawn_primitive(
            &mut commands,
            &mut meshes,
            &mut materials,
            shape,
            transform.translation,
            transform.rotation,
            transform.scale,
            container.0,
        );
        requests.write(ToolRequest::Exit);
        return;
    }

    // Uniform preview scaling on the stick's horizontal axis
    let mut axis = pointer.stick_value().x;
    if settings.invert_scale {
        axis = -axis;
    }
    if axis.abs() > settings.stick_deadzone {
        let factor = 1.0 + axis * settings.scale_speed * time.delta_secs();
        let uniform = (transform.scale.x * factor)
            .clamp(settings.preview_scale_min, settings.preview_scale_max);
        transform.scale = if shape == PrimitiveShape::Plane {
            Vec3::new(uniform, 1.0, uniform)
        } else {
            Vec3::splat(uniform)
        };
    }

    if pointer.cancel_pressed_this_tick() {
        requests.write(ToolRequest::Exit);
    }
}
