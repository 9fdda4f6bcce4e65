use bevy::prelude::*;

// Background Color
pub const BACKGROUND_COLOR: Color = Color::srgb(0.1, 0.1, 0.1);

// Highlight Colors
pub const HIGHLIGHT_COLOR: Color = Color::srgba(1.0, 0.85, 0.1, 1.0);
pub const DELETE_COLOR: Color = Color::srgba(1.0, 0.1, 0.1, 1.0);
pub const GHOST_COLOR: Color = Color::srgba(1.0, 0.0, 0.0, 0.5);

// Selection Outline
pub const OUTLINE_COLOR: Color = Color::srgba(1.0, 0.6, 0.0, 1.0);

// Guide Ray (start -> end gradient)
pub const RAY_START_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.9);
pub const RAY_END_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);

// Scene Object Base Colors
pub const PLACED_OBJECT_COLOR: Color = Color::srgb(0.7, 0.7, 0.75);
pub const GROUND_COLOR: Color = Color::srgb(0.25, 0.3, 0.25);

// UI Colors
pub const NORMAL_BUTTON: Color = Color::srgb(0.15, 0.15, 0.15);
pub const HOVERED_BUTTON: Color = Color::srgb(0.25, 0.25, 0.25);
pub const PRESSED_BUTTON: Color = Color::srgb(1.0, 0.6, 0.0);

// Button Outline Colors
pub const NORMAL_BUTTON_OUTLINE_COLOR: Color = Color::srgb(0.8, 0.8, 0.8);
pub const HOVERED_BUTTON_OUTLINE_COLOR: Color = Color::srgb(0.99, 0.99, 0.99);
pub const PRESSED_BUTTON_OUTLINE_COLOR: Color = Color::srgb(1.0, 0.6, 0.0);

// Panel Colors
pub const PANEL_BACKGROUND: Color = Color::srgba(0.12, 0.12, 0.12, 0.92);

// Button Styling
pub const BUTTON_BORDER_RADIUS: f32 = 8.0;
