//! Pointer abstraction
//!
//! "Where is the user pointing and what is pressed", answered the same
//! way for a screen cursor and for a tracked hand ray. Tools only ever
//! read [`PointerState`]; they never branch on the input modality and
//! never touch raw devices. One driver system fills the state each tick
//! in `PreUpdate`; with no camera/window/anchor available the ray is
//! simply absent and every consumer degrades to a no-op.

pub mod bindings;
pub mod cursor;
pub mod hand;

use bevy::input::InputSystem;
use bevy::prelude::*;

pub use bindings::{BoundButton, InputBindings, ResolvedBindings};
pub use hand::HandAnchor;

/// Per-tick pointer snapshot shared by every tool.
#[derive(Resource, Default, Debug, Clone)]
pub struct PointerState {
    /// Select transitioned from released to pressed this tick
    pub select_pressed: bool,
    /// Confirm transitioned from released to pressed this tick
    pub confirm_pressed: bool,
    /// Cancel transitioned from released to pressed this tick
    pub cancel_pressed: bool,
    /// Any bound button is currently held (level, not edge)
    pub any_pressed: bool,
    /// Continuous 2-axis value, each axis in [-1, 1]; zero when idle
    pub stick: Vec2,
    /// World-space pointing ray, if one can be derived this tick
    pub ray: Option<Ray3d>,
}

impl PointerState {
    pub fn select_pressed_this_tick(&self) -> bool {
        self.select_pressed
    }

    pub fn confirm_pressed_this_tick(&self) -> bool {
        self.confirm_pressed
    }

    pub fn cancel_pressed_this_tick(&self) -> bool {
        self.cancel_pressed
    }

    pub fn stick_value(&self) -> Vec2 {
        self.stick
    }

    pub fn current_ray(&self) -> Option<Ray3d> {
        self.ray
    }
}

/// Installs the pointer state and the driver for the chosen modality.
pub struct PointerPlugin {
    pub hand_ray: bool,
}

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>();
        if !app.world().contains_resource::<ResolvedBindings>() {
            app.init_resource::<ResolvedBindings>();
        }
        if self.hand_ray {
            app.add_systems(PreUpdate, hand::update_hand_pointer.after(InputSystem));
        } else {
            app.add_systems(PreUpdate, cursor::update_cursor_pointer.after(InputSystem));
        }
    }
}
