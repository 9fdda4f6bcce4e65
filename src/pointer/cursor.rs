//! Screen-cursor pointer driver
//!
//! Projects the primary window's cursor through the active 3D camera.
//! Select/confirm edges are suppressed while the cursor is over UI so
//! toolbar clicks never leak into the scene; cancel always gets
//! through. The stick contract maps to the scroll wheel (x) and the
//! arrow keys.

use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::{PointerState, ResolvedBindings};

pub fn update_cursor_pointer(
    mut pointer: ResMut<PointerState>,
    bindings: Res<ResolvedBindings>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    scroll: Res<AccumulatedMouseScroll>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    ui_nodes: Query<&Interaction>,
) {
    let over_ui = ui_nodes
        .iter()
        .any(|interaction| *interaction != Interaction::None);

    pointer.select_pressed =
        !over_ui && bindings.just_pressed(&bindings.select, &mouse, &keys, &gamepads);
    pointer.confirm_pressed =
        !over_ui && bindings.just_pressed(&bindings.confirm, &mouse, &keys, &gamepads);
    pointer.cancel_pressed = bindings.just_pressed(&bindings.cancel, &mouse, &keys, &gamepads);
    pointer.any_pressed = bindings.any_pressed(&mouse, &keys, &gamepads);

    pointer.stick = stick_from_scroll_and_keys(scroll.delta.y, &keys);
    pointer.ray = cursor_ray(&windows, &cameras);
}

fn stick_from_scroll_and_keys(scroll_y: f32, keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut stick = Vec2::new(scroll_y, 0.0);
    if keys.pressed(KeyCode::ArrowRight) {
        stick.x += 1.0;
    }
    if keys.pressed(KeyCode::ArrowLeft) {
        stick.x -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        stick.y += 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        stick.y -= 1.0;
    }
    stick.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
}

fn cursor_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<Camera3d>>,
) -> Option<Ray3d> {
    let window = windows.iter().next()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.iter().find(|(camera, _)| camera.is_active)?;
    camera.viewport_to_world(camera_transform, cursor).ok()
}
