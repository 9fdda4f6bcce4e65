//! Toolbar and panels
//!
//! The screen-space button surface: a main toolbar with foldable
//! Select/Create option panels and the delete confirmation panel at the
//! top of the screen. The UI only writes tool requests and reacts to
//! panel commands; it never reaches into tool state.

pub mod toolbar;

use bevy::prelude::*;

pub use toolbar::{PanelKind, ToolbarAction};

pub struct ToolbarUiPlugin;

impl Plugin for ToolbarUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, toolbar::spawn_toolbar).add_systems(
            Update,
            (
                toolbar::handle_toolbar_buttons,
                toolbar::apply_panel_commands,
                toolbar::update_button_colors,
            ),
        );
    }
}
