//! Hand-ray pointer driver
//!
//! Rays come from a tracked [`HandAnchor`] transform (position +
//! forward); buttons and the stick come from a gamepad through the same
//! bindings as the cursor driver. With no anchor in the scene the ray
//! is absent and tools idle.

use bevy::prelude::*;

use super::{PointerState, ResolvedBindings};

/// Marks the transform the hand ray originates from.
#[derive(Component, Debug)]
pub struct HandAnchor;

pub fn update_hand_pointer(
    mut pointer: ResMut<PointerState>,
    bindings: Res<ResolvedBindings>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    anchors: Query<&GlobalTransform, With<HandAnchor>>,
) {
    pointer.select_pressed = bindings.just_pressed(&bindings.select, &mouse, &keys, &gamepads);
    pointer.confirm_pressed = bindings.just_pressed(&bindings.confirm, &mouse, &keys, &gamepads);
    pointer.cancel_pressed = bindings.just_pressed(&bindings.cancel, &mouse, &keys, &gamepads);
    pointer.any_pressed = bindings.any_pressed(&mouse, &keys, &gamepads);

    pointer.stick = gamepads
        .iter()
        .next()
        .map(|pad| pad.right_stick())
        .unwrap_or(Vec2::ZERO)
        .clamp(Vec2::splat(-1.0), Vec2::splat(1.0));

    pointer.ray = anchors
        .iter()
        .next()
        .map(|anchor| Ray3d::new(anchor.translation(), anchor.forward()));
}
