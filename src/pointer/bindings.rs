//! Input bindings
//!
//! External configuration mapping physical buttons to the pointer
//! contract's Select / Confirm / Cancel actions. Loaded from a small
//! JSON file (`--bindings`); unspecified actions keep their defaults.
//!
//! ```json
//! { "select": ["Mouse:Left", "Pad:RightTrigger"], "cancel": ["Key:Escape"] }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::errors::{anyhow, BlockoutResult, Context};

/// A physical button on any supported device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundButton {
    Mouse(MouseButton),
    Key(KeyCode),
    Pad(GamepadButton),
}

/// Raw, serializable binding names as written in the bindings file.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct InputBindings {
    pub select: Vec<String>,
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            select: vec!["Mouse:Left".into(), "Pad:RightTrigger".into()],
            confirm: vec!["Mouse:Left".into(), "Pad:South".into()],
            cancel: vec![
                "Key:Escape".into(),
                "Mouse:Right".into(),
                "Pad:East".into(),
            ],
        }
    }
}

impl InputBindings {
    pub fn load(path: &Path) -> BlockoutResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading bindings file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing bindings file {}", path.display()))
    }

    pub fn resolve(&self) -> BlockoutResult<ResolvedBindings> {
        Ok(ResolvedBindings {
            select: resolve_list(&self.select)?,
            confirm: resolve_list(&self.confirm)?,
            cancel: resolve_list(&self.cancel)?,
        })
    }
}

/// Bindings parsed down to device buttons, ready for per-tick sampling.
#[derive(Resource, Clone, Debug)]
pub struct ResolvedBindings {
    pub select: Vec<BoundButton>,
    pub confirm: Vec<BoundButton>,
    pub cancel: Vec<BoundButton>,
}

impl Default for ResolvedBindings {
    fn default() -> Self {
        Self {
            select: vec![
                BoundButton::Mouse(MouseButton::Left),
                BoundButton::Pad(GamepadButton::RightTrigger),
            ],
            confirm: vec![
                BoundButton::Mouse(MouseButton::Left),
                BoundButton::Pad(GamepadButton::South),
            ],
            cancel: vec![
                BoundButton::Key(KeyCode::Escape),
                BoundButton::Mouse(MouseButton::Right),
                BoundButton::Pad(GamepadButton::East),
            ],
        }
    }
}

impl ResolvedBindings {
    /// Did any button bound to this action transition to pressed?
    pub fn just_pressed(
        &self,
        action: &[BoundButton],
        mouse: &ButtonInput<MouseButton>,
        keys: &ButtonInput<KeyCode>,
        gamepads: &Query<&Gamepad>,
    ) -> bool {
        action.iter().any(|button| match button {
            BoundButton::Mouse(b) => mouse.just_pressed(*b),
            BoundButton::Key(k) => keys.just_pressed(*k),
            BoundButton::Pad(b) => gamepads.iter().any(|pad| pad.just_pressed(*b)),
        })
    }

    /// Is any bound button of any action currently held?
    pub fn any_pressed(
        &self,
        mouse: &ButtonInput<MouseButton>,
        keys: &ButtonInput<KeyCode>,
        gamepads: &Query<&Gamepad>,
    ) -> bool {
        [&self.select, &self.confirm, &self.cancel]
            .into_iter()
            .flatten()
            .any(|button| match button {
                BoundButton::Mouse(b) => mouse.pressed(*b),
                BoundButton::Key(k) => keys.pressed(*k),
                BoundButton::Pad(b) => gamepads.iter().any(|pad| pad.pressed(*b)),
            })
    }
}

fn resolve_list(names: &[String]) -> BlockoutResult<Vec<BoundButton>> {
    names.iter().map(|name| parse_button(name)).collect()
}

fn parse_button(name: &str) -> BlockoutResult<BoundButton> {
    let (device, button) = name
        .split_once(':')
        .ok_or_else(|| anyhow!("binding '{name}' must look like 'Device:Button'"))?;
    match device {
        "Mouse" => Ok(BoundButton::Mouse(match button {
            "Left" => MouseButton::Left,
            "Right" => MouseButton::Right,
            "Middle" => MouseButton::Middle,
            other => return Err(anyhow!("unknown mouse button '{other}'")),
        })),
        "Key" => Ok(BoundButton::Key(match button {
            "Escape" => KeyCode::Escape,
            "Space" => KeyCode::Space,
            "Enter" => KeyCode::Enter,
            "Backspace" => KeyCode::Backspace,
            "Tab" => KeyCode::Tab,
            "Delete" => KeyCode::Delete,
            other => return Err(anyhow!("unknown key '{other}'")),
        })),
        "Pad" => Ok(BoundButton::Pad(match button {
            "South" => GamepadButton::South,
            "East" => GamepadButton::East,
            "West" => GamepadButton::West,
            "North" => GamepadButton::North,
            "LeftTrigger" => GamepadButton::LeftTrigger,
            "RightTrigger" => GamepadButton::RightTrigger,
            other => return Err(anyhow!("unknown gamepad button '{other}'")),
        })),
        other => Err(anyhow!("unknown input device '{other}'")),
    }
}
