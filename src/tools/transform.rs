//! Transform tools
//!
//! Move, Rotate and Scale share one state block and one tick. Move makes
//! the selected object follow the ground hit of the pointer ray with a
//! policy-controlled vertical coordinate; Rotate spins about the world
//! up axis; Scale grows or shrinks uniformly. All three leave the mode
//! on confirm or cancel, and leaving the armed family drops the
//! selection with it.

use bevy::prelude::*;

use crate::core::settings::{ToolkitSettings, VerticalMove};
use crate::pointer::PointerState;
use crate::scene::align::snap_xz;
use crate::scene::query::SceneRaycaster;
use crate::scene::SceneCategory;

use super::select::Selection;
use super::{ActiveTool, ToolEntered, ToolExited, ToolMode, ToolRequest};

#[derive(Resource, Default, Debug)]
pub struct TransformState {
    /// The object currently following the ray, if Move has latched one
    pub target: Option<Entity>,
    /// Height at the moment the follow began (Locked policy)
    pub original_height: f32,
    /// Stick-driven height (Stick policy), before vertical snapping
    pub tracked_height: f32,
    /// Set after one full tick with every button released; the confirm
    /// edge is ignored until then so the click that entered the mode
    /// cannot immediately commit it
    pub armed_for_confirm: bool,
    /// Selection observed last tick, to detect a fresh pick
    pub last_selected: Option<Entity>,
}

pub fn handle_transform_enter(
    mut entered: EventReader<ToolEntered>,
    mut state: ResMut<TransformState>,
) {
    for event in entered.read() {
        if matches!(
            event,
            ToolEntered::Moving | ToolEntered::Rotating | ToolEntered::Scaling
        ) {
            *state = TransformState::default();
        }
    }
}

pub fn handle_transform_exit(
    mut exited: EventReader<ToolExited>,
    mut state: ResMut<TransformState>,
) {
    for event in exited.read() {
        if matches!(
            event.0,
            ToolMode::Moving | ToolMode::Rotating | ToolMode::Scaling
        ) {
            *state = TransformState::default();
        }
    }
}

pub fn transform_tick(
    active: Res<ActiveTool>,
    mut state: ResMut<TransformState>,
    pointer: Res<PointerState>,
    raycaster: SceneRaycaster,
    settings: Res<ToolkitSettings>,
    time: Res<Time>,
    selection: Res<Selection>,
    mut transforms: Query<&mut Transform, With<SceneCategory>>,
    mut requests: EventWriter<ToolRequest>,
) {
    match active.0 {
        ToolMode::Moving => {}
        ToolMode::Rotating | ToolMode::Scaling => {
            stick_tick(
                active.0,
                &pointer,
                &settings,
                &time,
                &selection,
                &mut transforms,
                &mut requests,
            );
            return;
        }
        _ => return,
    }

    if pointer.cancel_pressed_this_tick() {
        requests.write(ToolRequest::Exit);
        return;
    }

    // A fresh pick (including the one already held when the mode was
    // entered) starts or retargets the follow.
    let selected = selection.current;
    if selected.is_some() && selected != state.last_selected {
        if let Some(target) = selected {
            if let Ok(transform) = transforms.get(target) {
                state.target = Some(target);
                state.original_height = transform.translation.y;
                state.tracked_height = transform.translation.y;
                state.armed_for_confirm = false;
            }
        }
    }
    state.last_selected = selected;

    if let Some(target) = state.target {
        follow_ground(target, &mut state, &pointer, &raycaster, &settings, &time, &mut transforms);
    }

    if !pointer.any_pressed {
        state.armed_for_confirm = true;
    }
    if state.target.is_some() && state.armed_for_confirm && pointer.confirm_pressed_this_tick() {
        requests.write(ToolRequest::Exit);
    }
}

fn follow_ground(
    target: Entity,
    state: &mut TransformState,
    pointer: &PointerState,
    raycaster: &SceneRaycaster,
    settings: &ToolkitSettings,
    time: &Time,
    transforms: &mut Query<&mut Transform, With<SceneCategory>>,
) {
    let Ok(mut transform) = transforms.get_mut(target) else {
        // Target destroyed mid-follow
        state.target = None;
        return;
    };

    let height = match settings.vertical_move {
        VerticalMove::Locked => state.original_height,
        VerticalMove::Stick { rate, clamp, step } => stick_height(
            &mut state.tracked_height,
            pointer.stick_value().y,
            settings.stick_deadzone,
            rate,
            clamp,
            step,
            time.delta_secs(),
        ),
    };

    let Some(ray) = pointer.current_ray() else {
        return;
    };
    let Some(hit) = raycaster.cast(ray, settings.placement_ray_distance, settings.ground_mask)
    else {
        return;
    };
    let mut pos = hit.point;
    pos.y = height;
    if settings.snap_to_grid {
        pos = snap_xz(pos, settings.grid_size);
    }
    transform.translation = pos;
}

fn stick_tick(
    mode: ToolMode,
    pointer: &PointerState,
    settings: &ToolkitSettings,
    time: &Time,
    selection: &Selection,
    transforms: &mut Query<&mut Transform, With<SceneCategory>>,
    requests: &mut EventWriter<ToolRequest>,
) {
    if pointer.cancel_pressed_this_tick() {
        requests.write(ToolRequest::Exit);
        return;
    }

    if let Some(target) = selection.current {
        if let Ok(mut transform) = transforms.get_mut(target) {
            let axis = pointer.stick_value().x;
            if axis.abs() > settings.stick_deadzone {
                match mode {
                    ToolMode::Rotating => {
                        let angle = rotate_step(
                            axis,
                            settings.rotate_speed,
                            settings.invert_rotate,
                            time.delta_secs(),
                        );
                        transform.rotate_y(angle);
                    }
                    ToolMode::Scaling => {
                        transform.scale = scale_step(
                            transform.scale,
                            axis,
                            settings.scale_speed,
                            settings.invert_scale,
                            time.delta_secs(),
                            settings.transform_scale_min,
                            settings.transform_scale_max,
                        );
                    }
                    _ => {}
                }
            }
        }
    }

    if pointer.confirm_pressed_this_tick() {
        requests.write(ToolRequest::Exit);
    }
}

/// Advance the stick-driven height policy by one tick and return the
/// effective height. The tracked height accumulates and is clamped, but
/// the snap step only applies to the returned value, never to the
/// accumulator itself.
pub fn stick_height(
    tracked: &mut f32,
    axis: f32,
    deadzone: f32,
    rate: f32,
    clamp: Option<[f32; 2]>,
    step: Option<f32>,
    dt: f32,
) -> f32 {
    if axis.abs() > deadzone {
        *tracked += axis * rate * dt;
    }
    if let Some([lo, hi]) = clamp {
        *tracked = tracked.clamp(lo, hi);
    }
    match step {
        Some(step) if step > 0.0 => (*tracked / step).round() * step,
        _ => *tracked,
    }
}

/// Rotation angle (radians) about world up for one tick. Positive axis
/// turns clockwise seen from above; `invert` flips it.
pub fn rotate_step(axis: f32, degrees_per_second: f32, invert: bool, dt: f32) -> f32 {
    let sign = if invert { 1.0 } else { -1.0 };
    sign * axis * degrees_per_second.to_radians() * dt
}

/// One tick of multiplicative uniform scaling, clamped per axis.
pub fn scale_step(
    scale: Vec3,
    axis: f32,
    speed: f32,
    invert: bool,
    dt: f32,
    min: f32,
    max: f32,
) -> Vec3 {
    let axis = if invert { -axis } else { axis };
    let factor = 1.0 + axis * speed * dt;
    (scale * factor).clamp(Vec3::splat(min), Vec3::splat(max))
}
